use super::position::{unpack, unpack_timer, MAX_PROFILES};
use super::reader::{DecodeError, Reader};
use crate::config::VideoSystem;
use crate::model::{DisplayItem, Entry, FieldRef, Model, UNKNOWN};
use crate::osd::field::Definition;
use crate::osd::{Catalog, Grid, Preview, PreviewContext, PreviewHints};
use crate::version::*;

/// Canvas reported by the firmware wins for HD only
pub fn resolve_grid(version: ApiVersion, video_system: VideoSystem, canvas: Option<Grid>) -> Grid {
    match (version >= API_VERSION_1_45, video_system, canvas) {
        (true, VideoSystem::HD, Some(canvas)) => canvas,
        _ => Grid::for_video_system(video_system),
    }
}

pub fn decode_canvas(response: &[u8]) -> Result<Grid, DecodeError> {
    let mut reader = Reader::new(response);
    let (width, height) = (reader.u8()?, reader.u8()?);
    Grid::new(width as i32, height as i32).ok_or(DecodeError::InvalidCanvas { width, height })
}

fn check_count(what: &str, reported: usize, expected: usize) {
    if reported != expected {
        warn!("Firmware reports {} {} while {} are known", reported, what, expected);
    }
}

type Keys = (&'static str, &'static str);

fn entries(definitions: &[&'static Definition], flags: &[bool], unknown: Keys) -> Vec<Entry> {
    let iter = flags.iter().enumerate().map(|(index, &enabled)| match definitions.get(index) {
        Some(definition) => Entry {
            index,
            name: definition.name,
            text: definition.text,
            desc: definition.desc,
            suffix: None,
            enabled,
        },
        None => Entry {
            index,
            name: UNKNOWN,
            text: unknown.0,
            desc: unknown.1,
            suffix: Some(index - definitions.len() + 1),
            enabled,
        },
    });
    iter.collect()
}

fn display_item(
    index: usize,
    field: FieldRef,
    word: u16,
    profiles: usize,
    base: &PreviewContext,
) -> DisplayItem {
    let layout = unpack(word, profiles);
    let context = PreviewContext { variant: layout.variant, ..*base };
    let (positionable, default_position, draw_order, preview) = match field {
        FieldRef::Known(definition) => (
            definition.positionable.resolve(&context),
            definition.default_position.resolve(&context),
            definition.draw_order,
            definition.preview.resolve(&context),
        ),
        FieldRef::Unknown { suffix } => {
            (true, -1, None, Preview::Text(format!("UNKNOWN {}", suffix).into_bytes()))
        }
    };
    let (position, origin) = match positionable {
        true => (base.grid.offset(layout.x, layout.y), Some((layout.x, layout.y))),
        false => (default_position, None),
    };
    let (visibility, variant) = (layout.visibility, layout.variant);
    DisplayItem {
        index,
        field,
        position,
        origin,
        positionable,
        visibility,
        variant,
        draw_order,
        preview,
    }
}

/// Decodes an OSD configuration record as a whole, any failure leaves nothing half built
pub fn decode(
    version: ApiVersion,
    record: &[u8],
    hints: &PreviewHints,
    canvas: Option<Grid>,
) -> Result<Model, DecodeError> {
    let version = version.clamped();
    let catalog = Catalog::for_version(version);
    let mut reader = Reader::new(record);

    let flags = reader.u8()?;
    let mut model = Model::new(version, flags);
    if flags == 0 {
        return Ok(model);
    }
    let settings = &mut model.settings;
    settings.video_system = VideoSystem::from(reader.u8()?);
    model.grid = resolve_grid(version, settings.video_system, canvas);
    if !model.state.osd_feature {
        return Ok(model);
    }

    settings.unit_mode = reader.u8()?.into();
    settings.alarms.rssi = reader.u8()?;
    settings.alarms.capacity = reader.u16()?;
    let mut count = catalog.display.len();
    if version < API_VERSION_1_36 {
        settings.alarms.time = reader.u16()?;
    } else {
        reader.u8()?;
        let reported = reader.u8()? as usize;
        if version >= API_VERSION_1_37 {
            check_count("display items", reported, count);
            count = reported;
        }
    }
    settings.alarms.altitude = reader.u16()?;

    let mut words = Vec::with_capacity(count);
    while words.len() < count {
        if version < API_VERSION_1_36 && reader.remaining() < 2 {
            break;
        }
        words.push(reader.u16()?);
    }

    if version >= API_VERSION_1_36 {
        let count = reader.u8()? as usize;
        check_count("statistics", count, catalog.stats.len());
        let mut enabled = Vec::with_capacity(count);
        for _ in 0..count {
            enabled.push(reader.u8()? == 1);
        }
        let unknown = ("osdTextStatUnknown", "osdDescStatUnknown");
        model.stats = entries(&catalog.stats, &enabled, unknown);

        let count = reader.u8()? as usize;
        for index in 0..count {
            model.timers.push(unpack_timer(index, reader.u16()?));
        }

        let mut count = catalog.warnings.len();
        let mut flags = reader.u16()? as u32;
        if version >= API_VERSION_1_41 {
            count = reader.u8()? as usize;
            check_count("warnings", count, catalog.warnings.len());
            flags = reader.u32()?;
        }
        let enabled: Vec<bool> = (0..count).map(|i| i < 32 && flags & (1 << i) > 0).collect();
        let unknown = ("osdWarningTextUnknown", "osdWarningUnknown");
        model.warnings = entries(&catalog.warnings, &enabled, unknown);
    }

    if version >= API_VERSION_1_41 {
        let count = reader.u8()? as usize;
        let selected = reader.u8()? as usize;
        if count == 0 || count > MAX_PROFILES || selected == 0 || selected > count {
            return Err(DecodeError::InvalidProfiles { count, selected });
        }
        model.profiles.count = count;
        model.profiles.selected = selected - 1;
        model.settings.parameters.overlay_radio_mode = reader.u8()?;
    }

    if version >= API_VERSION_1_43 {
        let camera_frame = &mut model.settings.parameters.camera_frame;
        camera_frame.width = reader.u8()?;
        camera_frame.height = reader.u8()?;
    }

    if version >= API_VERSION_1_46 {
        model.settings.alarms.link_quality = reader.u16()?;
        model.settings.alarms.rssi_dbm = reader.i16()?;
    }

    let items = {
        let context = model.preview_context(hints);
        let profiles = model.profiles.count;
        let iter = words.iter().enumerate().map(|(index, &word)| {
            let field = match catalog.display.get(index) {
                Some(&definition) => FieldRef::Known(definition),
                None => FieldRef::Unknown { suffix: index - catalog.display.len() + 1 },
            };
            display_item(index, field, word, profiles, &context)
        });
        iter.collect()
    };
    model.items = items;
    let grid = model.grid;
    debug!("Decoded {} display items on a {}x{} grid", words.len(), grid.width, grid.height);
    Ok(model)
}

mod test {
    #[test]
    fn test_decode_legacy_record() {
        use hex_literal::hex;

        use super::decode;
        use crate::config::{UnitMode, VideoSystem};
        use crate::osd::{Grid, PreviewHints};
        use crate::version::API_VERSION_1_32;

        // PAL, metric, rssi 20, capacity 2200, time 10, altitude 100, three positions
        let record = hex!("01 01 01 14 9808 0a00 6400 c109 3508 0000");
        let model = decode(API_VERSION_1_32, &record, &PreviewHints::default(), None).unwrap();
        assert_eq!(model.settings.video_system, VideoSystem::PAL);
        assert_eq!(model.settings.unit_mode, UnitMode::Metric);
        assert_eq!(model.settings.alarms.capacity, 2200);
        assert_eq!(model.settings.alarms.time, 10);
        assert_eq!(model.grid, Grid::default());
        assert!(model.state.max7456_configured);

        // stops at the end of the record instead of failing
        assert_eq!(model.items.len(), 3);
        assert_eq!(model.items[0].field.name(), "RSSI_VALUE");
        assert_eq!(model.items[0].position, 421);
        assert_eq!(model.items[0].visibility, vec![true]);
        assert_eq!(model.items[1].position, 51);
        // crosshairs is fixed to the centre before 1.39
        assert!(!model.items[2].positionable);
        assert_eq!(model.items[2].position, 223);
        assert!(!model.items[2].is_visible(0));
        assert_eq!(model.profiles.count, 1);
        assert_eq!(model.settings.parameters.camera_frame.width, 24);
    }

    #[test]
    fn test_decode_without_osd() {
        use super::decode;
        use crate::osd::PreviewHints;
        use crate::version::API_VERSION_1_46;

        let hints = PreviewHints::default();
        let model = decode(API_VERSION_1_46, &[0], &hints, None).unwrap();
        assert!(!model.has_osd());
        assert!(model.items.is_empty());

        // slave OSD without the feature: video system only
        let model = decode(API_VERSION_1_46, &[0x02, 0x02], &hints, None).unwrap();
        assert!(model.state.slave);
        assert_eq!(model.grid.height, 13);
        assert!(model.items.is_empty());
    }

    #[test]
    fn test_decode_current_record() {
        use super::decode;
        use crate::model::FieldRef;
        use crate::osd::{Catalog, PreviewHints};
        use crate::session::virtual_fc::VirtualFc;
        use crate::version::API_VERSION_1_46;

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.profile_count = 3;
        fc.selected_profile = 2;
        fc.words[0] = 0x89C1;
        fc.timers[1] = 0x0A21;
        fc.warning_flags = 0b101;
        fc.settings.alarms.rssi_dbm = -90;
        let model = decode(API_VERSION_1_46, &fc.record(), &PreviewHints::default(), None).unwrap();

        let catalog = Catalog::for_version(API_VERSION_1_46);
        assert_eq!(model.items.len(), catalog.display.len());
        assert!(model.items.iter().all(|item| item.field.is_known()));
        let rssi = &model.items[0];
        assert_eq!(rssi.field, FieldRef::Known(&crate::osd::fields::RSSI_VALUE));
        assert_eq!((rssi.position, rssi.variant), (421, 2));
        assert_eq!(rssi.visibility, vec![true, false, false]);
        assert_eq!(rssi.draw_order, Some(30));

        assert_eq!(model.profiles.count, 3);
        assert_eq!(model.profiles.selected, 1);
        assert_eq!(model.timers[1].precision, 2);
        assert_eq!(model.stats.len(), catalog.stats.len());
        let warnings: Vec<bool> = model.warnings.iter().map(|w| w.enabled).collect();
        assert_eq!(&warnings[..4], &[true, false, true, false]);
        assert_eq!(model.warning_flags(), 0b101);
        assert_eq!(model.settings.alarms.rssi_dbm, -90);
    }

    #[test]
    fn test_decode_placeholders() {
        use super::decode;
        use crate::model::FieldRef;
        use crate::osd::{Catalog, Preview, PreviewHints};
        use crate::session::virtual_fc::VirtualFc;
        use crate::version::API_VERSION_1_46;

        let catalog = Catalog::for_version(API_VERSION_1_46);
        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.words.resize(catalog.display.len() + 2, 0x0800);
        fc.stats.resize(catalog.stats.len() + 1, true);
        fc.warning_count += 3;

        let hints = PreviewHints::default();
        let first = decode(API_VERSION_1_46, &fc.record(), &hints, None).unwrap();
        let second = decode(API_VERSION_1_46, &fc.record(), &hints, None).unwrap();
        assert_eq!(first, second);

        let unknown: Vec<_> = first.items.iter().filter(|item| !item.field.is_known()).collect();
        assert_eq!(unknown.len(), 2);
        assert_eq!(unknown[1].field, FieldRef::Unknown { suffix: 2 });
        assert_eq!(unknown[1].preview, Preview::Text(b"UNKNOWN 2".to_vec()));
        assert_eq!(unknown[1].index, catalog.display.len() + 1);
        assert_eq!(unknown[1].position, 0);
        let last = first.stats.last().map(|stat| (stat.text, stat.suffix));
        assert_eq!(last, Some(("osdTextStatUnknown", Some(1))));
        let suffixes: Vec<_> = first.warnings.iter().filter_map(|w| w.suffix).collect();
        assert_eq!(suffixes, vec![1, 2, 3]);

        // fewer than known: no placeholders
        fc.words.truncate(10);
        let model = decode(API_VERSION_1_46, &fc.record(), &hints, None).unwrap();
        assert_eq!(model.items.len(), 10);
        assert!(model.items.iter().all(|item| item.field.is_known()));
    }

    #[test]
    fn test_decode_errors() {
        use super::{decode, decode_canvas};
        use crate::osd::{Grid, PreviewHints};
        use crate::protocol::DecodeError;
        use crate::session::virtual_fc::VirtualFc;
        use crate::version::API_VERSION_1_46;

        let hints = PreviewHints::default();
        let mut fc = VirtualFc::new(API_VERSION_1_46);
        let record = fc.record();
        let result = decode(API_VERSION_1_46, &record[..record.len() - 1], &hints, None);
        assert!(matches!(result, Err(DecodeError::Truncated { needed: 1, .. })));

        fc.profile_count = 4;
        let result = decode(API_VERSION_1_46, &fc.record(), &hints, None);
        assert_eq!(result, Err(DecodeError::InvalidProfiles { count: 4, selected: 1 }));
        fc.profile_count = 2;
        fc.selected_profile = 3;
        let result = decode(API_VERSION_1_46, &fc.record(), &hints, None);
        assert_eq!(result, Err(DecodeError::InvalidProfiles { count: 2, selected: 3 }));

        assert_eq!(decode_canvas(&[53, 20]), Ok(Grid { width: 53, height: 20 }));
        let error = DecodeError::InvalidCanvas { width: 80, height: 20 };
        assert_eq!(decode_canvas(&[80, 20]), Err(error));
        assert!(decode_canvas(&[53]).is_err());
    }

    #[test]
    fn test_decode_hd_canvas() {
        use super::decode;
        use crate::config::VideoSystem;
        use crate::osd::{Grid, PreviewHints};
        use crate::session::virtual_fc::VirtualFc;
        use crate::version::{API_VERSION_1_44, API_VERSION_1_46};

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.settings.video_system = VideoSystem::HD;
        // x = 40, y = 2
        fc.words[0] = 0x0800 | 0x0400 | 2 << 5 | 8;
        let canvas = Grid::new(50, 18);
        let hints = PreviewHints::default();
        let model = decode(API_VERSION_1_46, &fc.record(), &hints, canvas).unwrap();
        assert_eq!(model.grid, Grid { width: 50, height: 18 });
        assert_eq!(model.items[0].position, 2 * 50 + 40);

        let fc = VirtualFc::new(API_VERSION_1_44);
        let model = decode(API_VERSION_1_44, &fc.record(), &hints, canvas).unwrap();
        assert_eq!(model.grid, Grid::default());
    }
}
