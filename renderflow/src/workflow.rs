//! Builder that collects ordered results inside a workflow

use crate::types::{FigureRef, PayloadValue, PlotItem, ResultItem, TableData};

/// Collects text, table, plot and code results in emission order
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    pub name: String,
    pub description: String,
    results: Vec<ResultItem>,
}

impl Workflow {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, description: D) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            results: Vec::new(),
        }
    }

    pub fn add_text<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.results.push(ResultItem::text(lines));
        self
    }

    pub fn add_table<S: Into<String>>(&mut self, title: S, data: TableData) -> &mut Self {
        self.results.push(ResultItem::table(title, data));
        self
    }

    pub fn add_plot(&mut self, figure: FigureRef) -> &mut Self {
        self.results.push(ResultItem::plot(figure));
        self
    }

    /// Add a plot carrying an id, title or save flag
    pub fn add_plot_item(&mut self, plot: PlotItem) -> &mut Self {
        self.results.push(ResultItem::Plot(plot));
        self
    }

    pub fn add_code<I, S, L>(&mut self, lines: I, language: L) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        L: Into<String>,
    {
        self.results.push(ResultItem::code(lines, language));
        self
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Modern-shape payload of everything collected so far
    pub fn build(&self) -> PayloadValue {
        PayloadValue::results(self.results.iter().cloned())
    }

    pub fn clear(&mut self) -> &mut Self {
        self.results.clear();
        self
    }
}
