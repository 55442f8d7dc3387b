use alloc::borrow::Cow;
use core::fmt;

use jiff::civil::{Date, DateTime, Time};
use jiff::{Timestamp, Zoned};

use crate::value::{QueryMap, QuerySeq, QueryStruct};

// -----------------------------------------------------------------------------
// DateTimeRef

/// A borrowed `jiff` date-time.
#[derive(Debug, Clone, Copy)]
pub enum DateTimeRef<'a> {
    Date(Date),
    Time(Time),
    DateTime(DateTime),
    Zoned(&'a Zoned),
    Timestamp(Timestamp),
}

// -----------------------------------------------------------------------------
// QueryRef

/// The borrowed form of a value, as seen by the marshaller.
pub enum QueryRef<'a> {
    /// An absent value (`None`).
    Null,
    /// Text before percent-encoding.
    Scalar(Cow<'a, str>),
    Seq(&'a dyn QuerySeq),
    Map(&'a dyn QueryMap),
    DateTime(DateTimeRef<'a>),
    Struct(&'a dyn QueryStruct),
}

impl QueryRef<'_> {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Variant name for diagnostics.
    pub const fn form(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Scalar(_) => "Scalar",
            Self::Seq(_) => "Seq",
            Self::Map(_) => "Map",
            Self::DateTime(_) => "DateTime",
            Self::Struct(_) => "Struct",
        }
    }
}

impl fmt::Debug for QueryRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(text) => f.debug_tuple("Scalar").field(text).finish(),
            Self::DateTime(value) => f.debug_tuple("DateTime").field(value).finish(),
            Self::Seq(seq) => write!(f, "Seq(len = {})", seq.len()),
            Self::Map(map) => write!(f, "Map(len = {})", map.len()),
            other => f.pad(other.form()),
        }
    }
}
