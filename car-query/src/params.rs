//! Query parameters and request URL construction.
//!
//! Every CarQuery request is a GET against the same endpoint, selected by a
//! `cmd` parameter and narrowed by free-form filters. Filters are forwarded
//! verbatim; the client never validates names or value types.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;

/// Name of the query parameter that selects the remote operation.
pub const CMD_PARAM: &str = "cmd";

/// Remote operations understood by the CarQuery API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    GetYears,
    GetMakes,
    GetModels,
    GetTrims,
    GetModel,
}

impl Command {
    /// All commands, in the order the API documents them.
    pub const ALL: [Command; 5] = [
        Command::GetYears,
        Command::GetMakes,
        Command::GetModels,
        Command::GetTrims,
        Command::GetModel,
    ];

    /// The value sent as `cmd`.
    pub fn as_str(self) -> &'static str {
        match self {
            Command::GetYears => "getYears",
            Command::GetMakes => "getMakes",
            Command::GetModels => "getModels",
            Command::GetTrims => "getTrims",
            Command::GetModel => "getModel",
        }
    }

    /// Top-level response field holding this command's payload.
    ///
    /// `getModel` has no such field; its response is decoded separately.
    pub fn response_key(self) -> Option<&'static str> {
        match self {
            Command::GetYears => Some("Years"),
            Command::GetMakes => Some("Makes"),
            Command::GetModels => Some("Models"),
            Command::GetTrims => Some("Trims"),
            Command::GetModel => None,
        }
    }

    /// Look a command up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    /// Sent as `1` or `0`, the API's boolean convention.
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Text(s.clone())
    }
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(n: $t) -> Self {
                    ParamValue::Int(i64::from(n))
                }
            }
        )*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_int_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                /// Values outside the `i64` range are sent as their decimal text.
                fn from(n: $t) -> Self {
                    i64::try_from(n)
                        .map(ParamValue::Int)
                        .unwrap_or_else(|_| ParamValue::Text(n.to_string()))
                }
            }
        )*
    };
}

wide_int_param!(u64, usize, isize);

impl From<f32> for ParamValue {
    fn from(x: f32) -> Self {
        ParamValue::Float(f64::from(x))
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Filter parameters for a single request, keyed by parameter name.
///
/// Names are kept sorted so the same filters always produce the same URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a parameter, returning the previous value if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Remove a parameter.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    /// Value of a parameter, if set.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of parameters set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, ParamValue>> for QueryParams {
    fn from(values: BTreeMap<String, ParamValue>) -> Self {
        Self { values }
    }
}

/// Build the request URL for `command` with the given filters.
///
/// Any existing query on `base` is replaced. `cmd` always comes first and
/// always names `command`; a caller-supplied `cmd` filter is dropped.
pub fn build_url(base: &Url, command: Command, params: &QueryParams) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(CMD_PARAM, command.as_str());
        for (name, value) in params.iter().filter(|(name, _)| *name != CMD_PARAM) {
            pairs.append_pair(name, &value.to_string());
        }
    }
    url
}
