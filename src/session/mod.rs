pub mod virtual_fc;

use core::fmt;

use hal::msp::{Transport, MSP_EEPROM_WRITE, MSP_OSD_CANVAS, MSP_OSD_CONFIG, MSP_SET_OSD_CONFIG};

use crate::config::{pathset, Path, PathSet, Value, VideoSystem};
use crate::model::{DisplayItem, Model, Timer};
use crate::osd::{Catalog, PreviewHints};
use crate::preview::placement::{place, PlacementError};
use crate::preview::preset::{preset_position, Preset};
use crate::preview::{compose, PreviewBuffer};
use crate::protocol::{self, decode_canvas, DecodeError, EncodeError};
use crate::version::{ApiVersion, API_VERSION_1_45};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error<E> {
    Decode(DecodeError),
    Encode(EncodeError),
    Placement(PlacementError),
    Settings(pathset::Error),
    InvalidProfile(usize),
    Transport(E),
}

impl<E> From<DecodeError> for Error<E> {
    fn from(error: DecodeError) -> Self {
        Self::Decode(error)
    }
}

impl<E> From<EncodeError> for Error<E> {
    fn from(error: EncodeError) -> Self {
        Self::Encode(error)
    }
}

impl<E> From<PlacementError> for Error<E> {
    fn from(error: PlacementError) -> Self {
        Self::Placement(error)
    }
}

impl<E> From<pathset::Error> for Error<E> {
    fn from(error: pathset::Error) -> Self {
        Self::Settings(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "{}", e),
            Self::Encode(e) => write!(f, "{}", e),
            Self::Placement(e) => write!(f, "{}", e),
            Self::Settings(e) => write!(f, "{}", e),
            Self::InvalidProfile(profile) => write!(f, "No such profile {}", profile),
            Self::Transport(e) => write!(f, "Transport error {:?}", e),
        }
    }
}

/// Editing session against one flight controller.
///
/// Every edit is encoded against a copy of the model and sent as a single request,
/// the model is then replaced by a fresh read back. A failed request leaves it untouched.
pub struct Session<T: Transport> {
    transport: T,
    version: ApiVersion,
    hints: PreviewHints,
    model: Model,
    preview_profile: usize,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, version: ApiVersion, hints: PreviewHints) -> Self {
        let version = version.clamped();
        Self { transport, version, hints, model: Model::new(version, 0), preview_profile: 0 }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::for_version(self.version)
    }

    pub fn preview_profile(&self) -> usize {
        self.preview_profile
    }

    pub fn preview(&self) -> PreviewBuffer {
        compose(self.model.grid, &self.model.items, self.preview_profile)
    }

    fn request(&mut self, code: u16, payload: &[u8]) -> Result<Vec<u8>, Error<T::Error>> {
        debug!("Request {} with {} bytes", code, payload.len());
        self.transport.request(code, payload).map_err(Error::Transport)
    }

    pub fn refresh(&mut self) -> Result<(), Error<T::Error>> {
        let canvas = match self.version >= API_VERSION_1_45 {
            true => Some(decode_canvas(&self.request(MSP_OSD_CANVAS, &[])?)?),
            false => None,
        };
        let record = self.request(MSP_OSD_CONFIG, &[])?;
        let model = protocol::decode(self.version, &record, &self.hints, canvas)?;
        self.preview_profile = self.preview_profile.min(model.profiles.count - 1);
        info!("OSD configuration of {} items loaded", model.items.len());
        self.model = model;
        Ok(())
    }

    fn send(&mut self, payload: Vec<u8>) -> Result<(), Error<T::Error>> {
        self.request(MSP_SET_OSD_CONFIG, &payload)?;
        self.refresh()
    }

    fn item(&self, index: usize) -> Result<&DisplayItem, Error<T::Error>> {
        self.model.item(index).ok_or(Error::Encode(EncodeError::UnknownItem(index)))
    }

    fn check_profile(&self, profile: usize) -> Result<(), Error<T::Error>> {
        match profile < self.model.profiles.count {
            true => Ok(()),
            false => Err(Error::InvalidProfile(profile)),
        }
    }

    fn update_item(&mut self, item: DisplayItem) -> Result<(), Error<T::Error>> {
        let payload = protocol::encode_layout(&item, self.model.profiles.count, self.model.grid)?;
        self.send(payload)
    }

    fn update_settings(&mut self, model: Model) -> Result<(), Error<T::Error>> {
        self.send(protocol::encode_settings(&model))
    }

    pub fn select_preview_profile(&mut self, profile: usize) -> Result<(), Error<T::Error>> {
        self.check_profile(profile)?;
        self.preview_profile = profile;
        Ok(())
    }

    /// Drops an item at `drop`, grabbed by its local cell `grab`. Returns the new position.
    pub fn move_item(
        &mut self,
        index: usize,
        drop: (i32, i32),
        grab: (i32, i32),
    ) -> Result<i32, Error<T::Error>> {
        let mut item = self.item(index)?.clone();
        item.position = place(self.model.grid, &item, drop, grab)?;
        item.origin = None;
        let position = item.position;
        self.update_item(item)?;
        Ok(position)
    }

    pub fn move_to_preset(
        &mut self,
        index: usize,
        preset: Preset,
    ) -> Result<i32, Error<T::Error>> {
        let mut item = self.item(index)?.clone();
        if !item.positionable {
            return Err(PlacementError::NotPositionable(index).into());
        }
        let buffer = self.preview();
        let position = preset_position(self.model.grid, &buffer, &item, preset)
            .ok_or(PlacementError::NoRoom(index))?;
        item.position = position;
        item.origin = None;
        self.update_item(item)?;
        Ok(position)
    }

    pub fn set_visibility(
        &mut self,
        index: usize,
        profile: usize,
        visible: bool,
    ) -> Result<(), Error<T::Error>> {
        self.check_profile(profile)?;
        let mut item = self.item(index)?.clone();
        item.visibility.resize(self.model.profiles.count, false);
        item.visibility[profile] = visible;
        self.update_item(item)
    }

    pub fn set_variant(&mut self, index: usize, variant: u8) -> Result<(), Error<T::Error>> {
        let mut item = self.item(index)?.clone();
        let count = item.field.variants().len().max(1);
        if variant >= 4 || (item.field.is_known() && variant as usize >= count) {
            return Err(EncodeError::InvalidVariant { index, variant }.into());
        }
        item.variant = variant;
        self.update_item(item)
    }

    pub fn set_timer(&mut self, timer: Timer) -> Result<(), Error<T::Error>> {
        if timer.index >= self.model.timers.len() {
            return Err(EncodeError::UnknownItem(timer.index).into());
        }
        let catalog = self.catalog();
        let unknown_source = timer.source as usize >= catalog.timer_sources.len();
        if unknown_source || timer.precision as usize >= catalog.timer_precisions.len() {
            let (index, source, precision) = (timer.index, timer.source, timer.precision);
            return Err(EncodeError::InvalidTimer { index, source, precision }.into());
        }
        self.send(protocol::encode_timer(&timer))
    }

    pub fn set_stat_enabled(
        &mut self,
        index: usize,
        enabled: bool,
    ) -> Result<(), Error<T::Error>> {
        let stat = self.model.stats.iter().find(|stat| stat.index == index);
        let mut stat = stat.cloned().ok_or(EncodeError::UnknownItem(index))?;
        stat.enabled = enabled;
        self.send(protocol::encode_stat(&stat))
    }

    pub fn set_warning_enabled(
        &mut self,
        index: usize,
        enabled: bool,
    ) -> Result<(), Error<T::Error>> {
        let mut model = self.model.clone();
        let warning = model.warnings.iter_mut().find(|warning| warning.index == index);
        warning.ok_or(EncodeError::UnknownItem(index))?.enabled = enabled;
        self.update_settings(model)
    }

    /// Edits global settings by path, e.g. `alarms.rssi`. No value resets to default.
    pub fn set_settings(
        &mut self,
        path: &str,
        value: Option<&str>,
    ) -> Result<(), Error<T::Error>> {
        let mut model = self.model.clone();
        model.settings.set(Path::from(path), Value(value))?;
        self.update_settings(model)
    }

    /// Profile shown by the OSD in flight
    pub fn select_profile(&mut self, profile: usize) -> Result<(), Error<T::Error>> {
        self.check_profile(profile)?;
        let mut model = self.model.clone();
        model.profiles.selected = profile;
        self.update_settings(model)
    }

    pub fn set_video_system(&mut self, video_system: VideoSystem) -> Result<(), Error<T::Error>> {
        let mut model = self.model.clone();
        model.settings.video_system = video_system;
        self.update_settings(model)
    }

    pub fn save(&mut self) -> Result<(), Error<T::Error>> {
        self.request(MSP_EEPROM_WRITE, &[])?;
        info!("OSD configuration saved");
        Ok(())
    }
}

mod test {
    #[cfg(test)]
    use super::virtual_fc::VirtualFc;

    #[cfg(test)]
    fn connect(fc: VirtualFc) -> super::Session<VirtualFc> {
        use crate::osd::PreviewHints;

        let version = fc.version;
        let mut session = super::Session::new(fc, version, PreviewHints::default());
        assert_eq!(session.refresh(), Ok(()));
        session
    }

    #[test]
    fn test_refresh() {
        use hal::msp::{MSP_OSD_CANVAS, MSP_OSD_CONFIG};

        use super::Error;
        use crate::config::VideoSystem;
        use crate::osd::Grid;
        use crate::version::{API_VERSION_1_32, API_VERSION_1_46};

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.settings.video_system = VideoSystem::HD;
        fc.canvas = (50, 18);
        let session = connect(fc);
        let codes: Vec<u16> = session.transport().requests.iter().map(|r| r.0).collect();
        assert_eq!(codes, vec![MSP_OSD_CANVAS, MSP_OSD_CONFIG]);
        assert_eq!(session.model().grid, Grid { width: 50, height: 18 });
        assert_eq!(session.model().items.len(), session.catalog().display.len());

        let mut session = connect(VirtualFc::new(API_VERSION_1_32));
        assert_eq!(session.transport().requests.len(), 1);
        assert_eq!(session.model().items.len(), session.catalog().display.len());

        session.transport_mut().offline = true;
        let model = session.model().clone();
        assert_eq!(session.refresh(), Err(Error::Transport(())));
        assert_eq!(session.model(), &model);
    }

    #[test]
    fn test_refresh_rejects_bad_record() {
        use super::Error;
        use crate::config::VideoSystem;
        use crate::protocol::DecodeError;
        use crate::version::API_VERSION_1_46;

        let mut session = connect(VirtualFc::new(API_VERSION_1_46));
        let model = session.model().clone();
        session.transport_mut().profile_count = 4;
        let error = DecodeError::InvalidProfiles { count: 4, selected: 1 };
        assert_eq!(session.refresh(), Err(Error::Decode(error)));
        assert_eq!(session.model(), &model);

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.settings.video_system = VideoSystem::HD;
        let mut session = connect(fc);
        let model = session.model().clone();
        session.transport_mut().canvas = (0, 18);
        let error = DecodeError::InvalidCanvas { width: 0, height: 18 };
        assert_eq!(session.refresh(), Err(Error::Decode(error)));
        assert_eq!(session.model(), &model);
    }

    #[test]
    fn test_move_item() {
        use super::Error;
        use crate::preview::placement::PlacementError;
        use crate::version::API_VERSION_1_46;

        let mut session = connect(VirtualFc::new(API_VERSION_1_46));
        assert_eq!(session.set_visibility(0, 0, true), Ok(()));
        assert_eq!(session.move_item(0, (28, 14), (0, 0)), Ok(447));
        assert_eq!(session.transport().words[0], 0x0800 | 14 << 5 | 27);
        let rssi = &session.model().items[0];
        assert_eq!((rssi.position, rssi.visibility.clone()), (447, vec![true]));
        let cell = session.preview().cell(28, 14).and_then(|cell| cell.occupant);
        assert_eq!(cell.map(|occupant| occupant.item), Some(0));

        let result = session.move_item(0, (40, 0), (0, 0));
        assert_eq!(result, Err(Error::Placement(PlacementError::OutsideGrid { x: 40, y: 0 })));

        session.transport_mut().offline = true;
        let model = session.model().clone();
        assert_eq!(session.move_item(0, (3, 3), (0, 0)), Err(Error::Transport(())));
        assert_eq!(session.model(), &model);
    }

    #[test]
    fn test_edit_item_off_grid() {
        use crate::config::VideoSystem;
        use crate::version::API_VERSION_1_46;

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.words[0] = 0x0800 | 14 << 5 | 1;
        let mut session = connect(fc);
        assert_eq!(session.set_video_system(VideoSystem::NTSC), Ok(()));
        assert_eq!(session.model().items[0].position, 421);
        assert_eq!(session.set_visibility(0, 0, false), Ok(()));
        assert_eq!(session.transport().words[0], 14 << 5 | 1);
        assert!(!session.model().items[0].is_visible(0));

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.settings.video_system = VideoSystem::HD;
        fc.canvas = (50, 18);
        fc.words[0] = 0x0C54;
        let mut session = connect(fc);
        assert_eq!(session.model().items[0].origin, Some((52, 2)));
        assert_eq!(session.set_visibility(0, 0, true), Ok(()));
        assert_eq!(session.transport().words[0], 0x0C54);
        assert_eq!(session.move_item(0, (3, 3), (0, 0)), Ok(153));
        assert_eq!(session.transport().words[0], 0x0800 | 3 << 5 | 3);
        assert_eq!(session.model().items[0].origin, Some((3, 3)));
    }

    #[test]
    fn test_move_to_preset() {
        use crate::preview::preset::Preset;
        use crate::version::API_VERSION_1_46;

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.words[0] = 0x0800 | 1 << 5 | 1;
        let mut session = connect(fc);
        assert_eq!(session.move_to_preset(0, Preset::TL), Ok(31));
        assert_eq!(session.set_visibility(1, 0, true), Ok(()));
        assert_eq!(session.move_to_preset(1, Preset::TL), Ok(61));
    }

    #[test]
    fn test_set_variant() {
        use super::Error;
        use crate::preview::footprint::footprint;
        use crate::protocol::EncodeError;
        use crate::version::API_VERSION_1_46;

        let mut session = connect(VirtualFc::new(API_VERSION_1_46));
        let items = &session.model().items;
        let index = items.iter().position(|item| item.field.name() == "ALTITUDE").unwrap();
        assert_eq!(session.set_variant(index, 1), Ok(()));
        assert_eq!(session.model().items[index].variant, 1);
        // no decimal
        assert_eq!(footprint(&session.model().items[index].preview).width(), 5);

        let requests = session.transport().requests.len();
        let error = EncodeError::InvalidVariant { index, variant: 2 };
        assert_eq!(session.set_variant(index, 2), Err(Error::Encode(error)));
        let error = EncodeError::InvalidVariant { index: 0, variant: 1 };
        assert_eq!(session.set_variant(0, 1), Err(Error::Encode(error)));
        assert_eq!(session.transport().requests.len(), requests);
    }

    #[test]
    fn test_toggles() {
        use super::Error;
        use crate::model::Timer;
        use crate::protocol::EncodeError;
        use crate::version::API_VERSION_1_46;

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.profile_count = 3;
        let mut session = connect(fc);

        assert_eq!(session.set_stat_enabled(4, true), Ok(()));
        assert!(session.transport().stats[4]);
        assert!(session.model().stats[4].enabled);
        let error = Error::Encode(EncodeError::UnknownItem(99));
        assert_eq!(session.set_stat_enabled(99, true), Err(error));

        assert_eq!(session.set_warning_enabled(2, true), Ok(()));
        assert_eq!(session.set_warning_enabled(17, true), Ok(()));
        assert_eq!(session.transport().warning_flags, 1 << 17 | 1 << 2);
        assert!(session.model().warnings[17].enabled);

        let timer = Timer { index: 1, source: 1, precision: 2, alarm: 10 };
        assert_eq!(session.set_timer(timer), Ok(()));
        assert_eq!(session.transport().timers[1], 0x0A21);
        assert_eq!(session.model().timers[1], timer);
        let requests = session.transport().requests.len();
        let invalid = Timer { precision: 16, ..timer };
        let error = EncodeError::InvalidTimer { index: 1, source: 1, precision: 16 };
        assert_eq!(session.set_timer(invalid), Err(Error::Encode(error)));
        let invalid = Timer { source: 4, ..timer };
        let error = EncodeError::InvalidTimer { index: 1, source: 4, precision: 2 };
        assert_eq!(session.set_timer(invalid), Err(Error::Encode(error)));
        assert_eq!(session.transport().requests.len(), requests);
        assert_eq!(session.transport().timers[1], 0x0A21);
        let timer = Timer { index: 2, ..timer };
        assert_eq!(session.set_timer(timer), Err(Error::Encode(EncodeError::UnknownItem(2))));

        assert_eq!(session.set_visibility(0, 2, true), Ok(()));
        assert_eq!(session.model().items[0].visibility, vec![false, false, true]);
        assert_eq!(session.set_visibility(0, 3, true), Err(Error::InvalidProfile(3)));

        assert_eq!(session.select_profile(2), Ok(()));
        assert_eq!(session.transport().selected_profile, 3);
        assert_eq!(session.model().profiles.selected, 2);
        assert_eq!(session.select_preview_profile(2), Ok(()));
        assert_eq!(session.select_preview_profile(3), Err(Error::InvalidProfile(3)));
        assert_eq!(session.preview_profile(), 2);
    }

    #[test]
    fn test_settings_and_save() {
        use hal::msp::MSP_EEPROM_WRITE;

        use super::Error;
        use crate::config::{pathset, VideoSystem};
        use crate::version::API_VERSION_1_46;

        let mut session = connect(VirtualFc::new(API_VERSION_1_46));
        assert_eq!(session.set_settings("alarms.rssi", Some("25")), Ok(()));
        assert_eq!(session.transport().settings.alarms.rssi, 25);
        assert_eq!(session.model().settings.alarms.rssi, 25);
        assert_eq!(session.set_settings("alarms.rssi", None), Ok(()));
        assert_eq!(session.model().settings.alarms.rssi, 0);
        let result = session.set_settings("alarms.voltage", Some("1"));
        assert_eq!(result, Err(Error::Settings(pathset::Error::UnknownPath)));

        assert_eq!(session.set_video_system(VideoSystem::NTSC), Ok(()));
        assert_eq!(session.model().grid.height, 13);

        assert_eq!(session.save(), Ok(()));
        assert_eq!(session.transport().saves, 1);
        assert_eq!(session.transport().requests.last(), Some(&(MSP_EEPROM_WRITE, vec![])));
    }
}
