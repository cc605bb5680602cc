//! Payload and result item types shared by every renderer
//!
//! A workflow returns a [`PayloadValue`], a dynamic tree that may carry opaque
//! figure handles. After validation it is normalized into a list of
//! [`ResultItem`]s, which is what renderers and exporters consume.

use crate::error::ContractError;
use crate::figure::ChartFigure;
use crate::traits::Figure;
use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a figure object
pub type FigureRef = Arc<dyn Figure>;

/// Insertion-ordered mapping used for payload dicts
pub type PayloadMap = IndexMap<String, PayloadValue>;

/// Result item type tags, in display order
pub const RESULT_TYPES: [&str; 4] = ["text", "table", "plot", "code"];

/// Dynamic value returned by a workflow
#[derive(Debug, Clone)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<PayloadValue>),
    Map(PayloadMap),
    Figure(FigureRef),
}

impl PayloadValue {
    /// Build a mapping from key/value pairs
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PayloadValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a modern-shape payload (`{"results": [...]}`) from typed items
    pub fn results<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ResultItem>,
    {
        let items: Vec<PayloadValue> = items.into_iter().map(|item| item.to_payload()).collect();
        Self::map([("results", Self::List(items))])
    }

    /// Human-readable type name used in contract error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "None",
            Self::Bool(_) => "bool",
            Self::Number(n) if n.is_f64() => "float",
            Self::Number(_) => "int",
            Self::String(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "dict",
            Self::Figure(_) => "figure",
        }
    }

    /// Quoted representation used when echoing an offending value back
    pub fn repr(&self) -> String {
        match self {
            Self::Null => "None".to_string(),
            Self::String(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PayloadValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PayloadMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Convert to JSON, replacing figures with their exchange tree
    ///
    /// Compact numeric fragments are left as-is.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Figure(figure) => figure.to_exchange_json(),
        }
    }
}

impl PartialEq for PayloadValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Figure(a), Self::Figure(b)) => same_figure(a, b),
            _ => false,
        }
    }
}

/// Display form used for paragraphs, table cells and code lines
impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
            Self::Figure(_) => f.write_str("<figure>"),
            Self::List(_) | Self::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}

fn same_figure(a: &FigureRef, b: &FigureRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for PayloadValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for PayloadValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<usize> for PayloadValue {
    fn from(value: usize) -> Self {
        Self::Number((value as u64).into())
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<PayloadValue>> From<Vec<T>> for PayloadValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<PayloadMap> for PayloadValue {
    fn from(map: PayloadMap) -> Self {
        Self::Map(map)
    }
}

impl From<FigureRef> for PayloadValue {
    fn from(figure: FigureRef) -> Self {
        Self::Figure(figure)
    }
}

impl From<ResultItem> for PayloadValue {
    fn from(item: ResultItem) -> Self {
        item.to_payload()
    }
}

impl From<Value> for PayloadValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

/// One normalized entry of a workflow's output
#[derive(Debug, Clone, PartialEq)]
pub enum ResultItem {
    Text(TextItem),
    Table(TableItem),
    Plot(PlotItem),
    Code(CodeItem),
}

/// Paragraphs of text, one per line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextItem {
    pub content: Vec<String>,
}

/// Titled table of equal-length columns
#[derive(Debug, Clone, PartialEq)]
pub struct TableItem {
    pub title: String,
    pub data: TableData,
}

/// Plot backed by an external figure object
#[derive(Debug, Clone)]
pub struct PlotItem {
    pub figure: Option<FigureRef>,
    pub title: Option<String>,
    /// Stable name used for exported files
    pub id: Option<String>,
    /// When false the export engine skips this plot
    pub save: bool,
}

/// Source listing with a display-only language hint
#[derive(Debug, Clone, PartialEq)]
pub struct CodeItem {
    pub content: Vec<String>,
    pub language: String,
}

impl PartialEq for PlotItem {
    fn eq(&self, other: &Self) -> bool {
        let same = match (&self.figure, &other.figure) {
            (Some(a), Some(b)) => same_figure(a, b),
            (None, None) => true,
            _ => false,
        };
        same && self.title == other.title && self.id == other.id && self.save == other.save
    }
}

impl PlotItem {
    pub fn new(figure: FigureRef) -> Self {
        Self {
            figure: Some(figure),
            title: None,
            id: None,
            save: true,
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }
}

/// Column-oriented table contents
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableData {
    columns: IndexMap<String, Vec<PayloadValue>>,
}

impl TableData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, replacing any column with the same name
    pub fn with_column<K, I, V>(mut self, name: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<PayloadValue>,
    {
        self.columns
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of rows, taken from the first column
    pub fn row_count(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    /// Cells of one row in header order; missing cells are `None`
    pub fn row(&self, index: usize) -> Vec<Option<&PayloadValue>> {
        self.columns.values().map(|column| column.get(index)).collect()
    }

    fn from_payload(value: Option<&PayloadValue>) -> Self {
        let Some(PayloadValue::Map(map)) = value else {
            return Self::default();
        };
        let columns = map
            .iter()
            .map(|(name, cells)| {
                let cells = match cells {
                    PayloadValue::List(items) => items.clone(),
                    other => vec![other.clone()],
                };
                (name.clone(), cells)
            })
            .collect();
        Self { columns }
    }

    fn to_payload(&self) -> PayloadValue {
        PayloadValue::Map(
            self.columns
                .iter()
                .map(|(name, cells)| (name.clone(), PayloadValue::List(cells.clone())))
                .collect(),
        )
    }
}

impl ResultItem {
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Text(TextItem {
            content: lines.into_iter().map(Into::into).collect(),
        })
    }

    pub fn table<S: Into<String>>(title: S, data: TableData) -> Self {
        Self::Table(TableItem {
            title: title.into(),
            data,
        })
    }

    pub fn plot(figure: FigureRef) -> Self {
        Self::Plot(PlotItem::new(figure))
    }

    pub fn code<I, S, L>(lines: I, language: L) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        L: Into<String>,
    {
        Self::Code(CodeItem {
            content: lines.into_iter().map(Into::into).collect(),
            language: language.into(),
        })
    }

    /// The `type` discriminator of this item
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Table(_) => "table",
            Self::Plot(_) => "plot",
            Self::Code(_) => "code",
        }
    }

    /// Convert a result item mapping (1-based `index` for error reporting)
    pub fn from_map(index: usize, map: &PayloadMap) -> Result<Self, ContractError> {
        let item_type = map.get("type");
        match item_type.and_then(PayloadValue::as_str) {
            Some("text") => Ok(Self::Text(TextItem {
                content: lines_from(map.get("content")),
            })),
            Some("table") => Ok(Self::Table(TableItem {
                title: optional_string(map.get("title")).unwrap_or_else(|| "Table".to_string()),
                data: TableData::from_payload(map.get("data")),
            })),
            Some("plot") => {
                let figure = map
                    .get("figure")
                    .ok_or(ContractError::PlotMissingFigure { index })?;
                Ok(Self::Plot(PlotItem {
                    figure: figure_from(figure),
                    title: optional_string(map.get("title")),
                    id: optional_string(map.get("id")),
                    save: !matches!(map.get("save"), Some(PayloadValue::Bool(false))),
                }))
            }
            Some("code") => Ok(Self::Code(CodeItem {
                content: lines_from(map.get("content")),
                language: optional_string(map.get("language")).unwrap_or_else(|| "text".to_string()),
            })),
            _ => Err(ContractError::InvalidItemType {
                index,
                found: item_type.map_or_else(|| "None".to_string(), PayloadValue::repr),
                allowed: RESULT_TYPES.join(", "),
            }),
        }
    }

    /// Convert back into a result item mapping
    pub fn to_payload(&self) -> PayloadValue {
        let mut map = PayloadMap::new();
        map.insert("type".to_string(), self.type_name().into());
        match self {
            Self::Text(text) => {
                map.insert("content".to_string(), text.content.clone().into());
            }
            Self::Table(table) => {
                map.insert("title".to_string(), table.title.clone().into());
                map.insert("data".to_string(), table.data.to_payload());
            }
            Self::Plot(plot) => {
                map.insert("figure".to_string(), plot.figure.clone().into());
                if let Some(title) = &plot.title {
                    map.insert("title".to_string(), title.clone().into());
                }
                if let Some(id) = &plot.id {
                    map.insert("id".to_string(), id.clone().into());
                }
                if !plot.save {
                    map.insert("save".to_string(), false.into());
                }
            }
            Self::Code(code) => {
                map.insert("content".to_string(), code.content.clone().into());
                map.insert("language".to_string(), code.language.clone().into());
            }
        }
        PayloadValue::Map(map)
    }
}

fn lines_from(value: Option<&PayloadValue>) -> Vec<String> {
    match value {
        None | Some(PayloadValue::Null) => Vec::new(),
        Some(PayloadValue::String(s)) => vec![s.clone()],
        Some(PayloadValue::List(items)) => items.iter().map(ToString::to_string).collect(),
        Some(other) => vec![other.to_string()],
    }
}

fn optional_string(value: Option<&PayloadValue>) -> Option<String> {
    match value {
        None | Some(PayloadValue::Null) => None,
        Some(PayloadValue::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn figure_from(value: &PayloadValue) -> Option<FigureRef> {
    match value {
        PayloadValue::Figure(figure) => Some(Arc::clone(figure)),
        PayloadValue::Map(_) => Some(Arc::new(ChartFigure::new(value.to_json()))),
        _ => None,
    }
}
