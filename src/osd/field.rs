use core::fmt;

use super::{grid::Grid, symbol::Symbols};
use crate::config::{CameraFrame, UnitMode, VideoSystem};
use crate::model::Timer;
use crate::version::ApiVersion;

/// One glyph of a sprite preview, relative to the anchor
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sprite {
    pub x: i8,
    pub y: i8,
    pub symbol: u8,
}

impl Sprite {
    pub const fn new(x: i8, y: i8, symbol: u8) -> Self {
        Self { x, y, symbol }
    }
}

/// Preview shape with every computed part already resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preview {
    Text(Vec<u8>),
    Rows(Vec<Vec<u8>>),
    Sprites(Vec<Sprite>),
}

impl Default for Preview {
    fn default() -> Self {
        Self::Text(Vec::new())
    }
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Rows(rows) => rows.iter().all(|row| row.is_empty()),
            Self::Sprites(sprites) => sprites.is_empty(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewHints {
    pub craft_name: String,
    pub display_name: String,
    pub crsf_receiver: bool,
    /// P, I, D and feed forward of roll, pitch and yaw
    pub pid_defaults: [[u16; 4]; 3],
}

impl Default for PreviewHints {
    fn default() -> Self {
        Self {
            craft_name: String::new(),
            display_name: String::new(),
            crsf_receiver: false,
            pid_defaults: [[45, 80, 40, 120], [47, 84, 46, 125], [45, 80, 0, 120]],
        }
    }
}

/// Everything a computed preview, position or positionable flag may look at
#[derive(Copy, Clone, Debug)]
pub struct PreviewContext<'a> {
    pub version: ApiVersion,
    pub symbols: Symbols,
    pub video_system: VideoSystem,
    pub grid: Grid,
    pub unit_mode: UnitMode,
    pub timers: &'a [Timer],
    pub camera_frame: CameraFrame,
    /// Variant selected by the item being resolved
    pub variant: u8,
    pub hints: &'a PreviewHints,
}

#[derive(Copy, Clone)]
pub enum PreviewTemplate {
    Text(&'static [u8]),
    Computed(fn(&PreviewContext) -> Preview),
    Rows(&'static [&'static [u8]]),
    Sprites(&'static [Sprite]),
}

impl PreviewTemplate {
    pub fn resolve(&self, context: &PreviewContext) -> Preview {
        match self {
            Self::Text(text) => Preview::Text(text.to_vec()),
            Self::Computed(function) => function(context),
            Self::Rows(rows) => Preview::Rows(rows.iter().map(|row| row.to_vec()).collect()),
            Self::Sprites(sprites) => Preview::Sprites(sprites.to_vec()),
        }
    }
}

impl fmt::Debug for PreviewTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed"),
            Self::Rows(rows) => f.debug_tuple("Rows").field(rows).finish(),
            Self::Sprites(sprites) => f.debug_tuple("Sprites").field(sprites).finish(),
        }
    }
}

#[derive(Copy, Clone)]
pub enum Resolvable<T: Copy + 'static> {
    Fixed(T),
    Computed(fn(&PreviewContext) -> T),
}

impl<T: Copy + 'static> Resolvable<T> {
    pub fn resolve(&self, context: &PreviewContext) -> T {
        match self {
            Self::Fixed(value) => *value,
            Self::Computed(function) => function(context),
        }
    }
}

impl<T: Copy + fmt::Debug + 'static> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed"),
        }
    }
}

pub trait Named {
    fn name(&self) -> &'static str;
}

/// Placeable display element
#[derive(Debug)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub text: &'static str,
    pub desc: &'static str,
    /// Only used when the field is not positionable, negative counts back from the end
    pub default_position: Resolvable<i32>,
    /// None draws below everything that has one
    pub draw_order: Option<u16>,
    pub positionable: Resolvable<bool>,
    pub variants: &'static [&'static str],
    pub preview: PreviewTemplate,
}

impl FieldDefinition {
    pub const fn new(
        name: &'static str,
        text: &'static str,
        desc: &'static str,
        preview: PreviewTemplate,
    ) -> Self {
        Self {
            name,
            text,
            desc,
            default_position: Resolvable::Fixed(-1),
            draw_order: None,
            positionable: Resolvable::Fixed(true),
            variants: &[],
            preview,
        }
    }

    pub const fn at(self, position: i32) -> Self {
        Self { default_position: Resolvable::Fixed(position), ..self }
    }

    pub const fn at_computed(self, position: fn(&PreviewContext) -> i32) -> Self {
        Self { default_position: Resolvable::Computed(position), ..self }
    }

    pub const fn order(self, order: u16) -> Self {
        Self { draw_order: Some(order), ..self }
    }

    pub const fn positionable_when(self, positionable: fn(&PreviewContext) -> bool) -> Self {
        Self { positionable: Resolvable::Computed(positionable), ..self }
    }

    pub const fn variants(self, variants: &'static [&'static str]) -> Self {
        Self { variants, ..self }
    }
}

impl Named for FieldDefinition {
    fn name(&self) -> &'static str {
        self.name
    }
}

/// Statistic or warning, identified by its index only
#[derive(Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: &'static str,
    pub text: &'static str,
    pub desc: &'static str,
}

impl Definition {
    pub const fn new(name: &'static str, text: &'static str, desc: &'static str) -> Self {
        Self { name, text, desc }
    }
}

impl Named for Definition {
    fn name(&self) -> &'static str {
        self.name
    }
}

mod test {
    #[test]
    fn test_resolve_template() {
        use super::{Preview, PreviewContext, PreviewHints, PreviewTemplate, Resolvable, Sprite};
        use crate::config::{CameraFrame, UnitMode, VideoSystem};
        use crate::osd::{grid::Grid, symbol::Symbols};
        use crate::version::API_VERSION_1_46;

        let hints = PreviewHints::default();
        let context = PreviewContext {
            version: API_VERSION_1_46,
            symbols: Symbols::default(),
            video_system: VideoSystem::NTSC,
            grid: Grid::for_video_system(VideoSystem::NTSC),
            unit_mode: UnitMode::Metric,
            timers: &[],
            camera_frame: CameraFrame::default(),
            variant: 0,
            hints: &hints,
        };

        static ROWS: [&[u8]; 2] = [b"ab", b"c"];
        let preview = PreviewTemplate::Rows(&ROWS).resolve(&context);
        assert_eq!(preview, Preview::Rows(vec![b"ab".to_vec(), b"c".to_vec()]));

        static SPRITES: [Sprite; 1] = [Sprite::new(-1, 0, 0x20)];
        let preview = PreviewTemplate::Sprites(&SPRITES).resolve(&context);
        assert_eq!(preview, Preview::Sprites(vec![Sprite::new(-1, 0, 0x20)]));

        fn lines(context: &PreviewContext) -> i32 {
            context.grid.height
        }
        assert_eq!(Resolvable::Computed(lines).resolve(&context), 13);
        assert_eq!(Resolvable::Fixed(-1).resolve(&context), -1);

        assert!(Preview::Rows(vec![vec![]]).is_empty());
        assert!(!PreviewTemplate::Text(b"AG").resolve(&context).is_empty());
    }
}
