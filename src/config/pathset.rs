use core::str::{FromStr, Split};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    UnknownPath,
    InvalidValue,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Value<'a>(pub Option<&'a str>);

impl<'a> Value<'a> {
    pub fn of(string: &'a str) -> Value<'a> {
        Value(Some(string))
    }

    pub fn parse<T: FromStr>(&self) -> Result<T, Error> {
        match self.0 {
            Some(s) => FromStr::from_str(s).map_err(|_| Error::InvalidValue),
            None => Err(Error::InvalidValue),
        }
    }

    /// Missing value resets to default
    pub fn parse_or_default<T: FromStr + Default>(&self) -> Result<T, Error> {
        match self.0 {
            Some(s) => FromStr::from_str(s).map_err(|_| Error::InvalidValue),
            None => Ok(T::default()),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let err_string = match self {
            Self::UnknownPath => "Specified path not exists or invalid",
            Self::InvalidValue => "Value not valid",
        };
        write!(f, "{}", err_string)
    }
}

#[derive(Clone, Debug)]
pub struct Path<'a>(Split<'a, char>);

impl<'a> Path<'a> {
    pub fn new(split: Split<'a, char>) -> Self {
        Self(split)
    }

    pub fn str(&mut self) -> Result<&'a str, Error> {
        self.0.next().ok_or(Error::UnknownPath)
    }

    pub fn end(mut self) -> Result<(), Error> {
        match self.0.next() {
            Some(_) => Err(Error::UnknownPath),
            None => Ok(()),
        }
    }
}

impl<'a> From<&'a str> for Path<'a> {
    fn from(path: &'a str) -> Self {
        Self(path.split('.'))
    }
}

pub trait PathSet {
    fn set(&mut self, path: Path, value: Value) -> Result<(), Error>;
}
