use crate::config::VideoSystem;

pub const MAX_WIDTH: i32 = 64;
pub const MAX_HEIGHT: i32 = 32;

/// Character grid of the OSD, row major
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self { width: 30, height: 16 }
    }
}

impl Grid {
    /// Dimensions beyond what a position word can address are rejected
    pub fn new(width: i32, height: i32) -> Option<Self> {
        if !(1..=MAX_WIDTH).contains(&width) || !(1..=MAX_HEIGHT).contains(&height) {
            return None;
        }
        Some(Self { width, height })
    }

    pub fn for_video_system(video_system: VideoSystem) -> Self {
        match video_system {
            VideoSystem::Auto | VideoSystem::PAL => Self { width: 30, height: 16 },
            VideoSystem::NTSC => Self { width: 30, height: 13 },
            VideoSystem::HD => Self { width: 53, height: 20 },
            VideoSystem::Other(_) => Self::default(),
        }
    }

    pub fn total(&self) -> i32 {
        self.width * self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    pub fn coordinates(&self, offset: i32) -> (i32, i32) {
        (offset.rem_euclid(self.width), offset.div_euclid(self.width))
    }

    pub fn offset(&self, x: i32, y: i32) -> i32 {
        y * self.width + x
    }
}

mod test {
    #[test]
    fn test_grid_for_video_system() {
        use super::Grid;
        use crate::config::VideoSystem;

        assert_eq!(Grid::for_video_system(VideoSystem::Auto).total(), 480);
        assert_eq!(Grid::for_video_system(VideoSystem::NTSC).total(), 390);
        assert_eq!(Grid::for_video_system(VideoSystem::HD).total(), 1060);
        assert_eq!(Grid::for_video_system(VideoSystem::Other(7)), Grid::default());
    }

    #[test]
    fn test_grid_limits() {
        use super::Grid;

        assert_eq!(Grid::new(64, 32), Some(Grid { width: 64, height: 32 }));
        assert_eq!(Grid::new(65, 16), None);
        assert_eq!(Grid::new(30, 0), None);

        let grid = Grid::default();
        assert_eq!(grid.coordinates(421), (1, 14));
        assert_eq!(grid.coordinates(-1), (29, -1));
        assert_eq!(grid.offset(1, 14), 421);
        assert!(!grid.contains(30, 0));
    }
}
