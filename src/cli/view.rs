use console::style;

use crate::core::model::{
    CellValue, Column, ModelEvent, ModelObserver, Orientation, Role, Row, SymbolsModel,
};

#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Text table on top of a `SymbolsModel`.
/// The view only keeps the order in which model rows are shown,
/// it is rebuilt from scratch whenever the model resets
#[derive(Default)]
pub struct TableView {
    order: Vec<Row>,
    sort: Option<(Column, SortOrder)>,
    plain: bool,
}

impl TableView {
    pub fn new(model: &SymbolsModel) -> Self {
        let mut view = Self::default();
        view.refresh(model);
        view
    }

    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.order
    }

    pub fn sort(&self) -> Option<(Column, SortOrder)> {
        self.sort
    }

    pub fn set_sort(&mut self, model: &SymbolsModel, sort: Option<(Column, SortOrder)>) {
        self.sort = sort;
        self.refresh(model);
    }

    /// Re-derives the row order from the model
    pub fn refresh(&mut self, model: &SymbolsModel) {
        self.order = (0..model.row_count()).collect();

        if let Some((column, order)) = self.sort {
            let keys: Vec<Option<CellValue>> = self
                .order
                .iter()
                .map(|row| {
                    model
                        .index(*row, column)
                        .and_then(|index| model.data(&index, Role::Sort))
                })
                .collect();
            match order {
                SortOrder::Ascending => self
                    .order
                    .sort_by(|a, b| keys[*a as usize].cmp(&keys[*b as usize])),
                SortOrder::Descending => self
                    .order
                    .sort_by(|a, b| keys[*b as usize].cmp(&keys[*a as usize])),
            }
        }
    }

    pub fn cells(&self, model: &SymbolsModel, row: Row) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|column| {
                model
                    .index(row, *column)
                    .and_then(|index| model.data(&index, Role::Display))
                    .map(|x| x.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    pub fn render(&self, model: &SymbolsModel) -> String {
        let headers: Vec<String> = (0..model.column_count())
            .map(|c| {
                model
                    .header_data(c, Orientation::Horizontal, Role::Display)
                    .map(|x| x.to_string())
                    .unwrap_or_default()
            })
            .collect();
        let rows: Vec<(String, Vec<String>)> = self
            .order
            .iter()
            .map(|row| {
                let label = model
                    .header_data(*row as usize, Orientation::Vertical, Role::Display)
                    .map(|x| x.to_string())
                    .unwrap_or_default();
                (label, self.cells(model, *row))
            })
            .collect();

        let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for (_, cells) in &rows {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header_line = format!(
            "{:label_width$}  {}",
            "",
            Self::line(&headers, &widths),
            label_width = label_width
        );
        if self.plain {
            out.push_str(header_line.trim_end());
        } else {
            out.push_str(&style(header_line.trim_end()).bold().to_string());
        }
        out.push('\n');

        for (label, cells) in &rows {
            let line = format!(
                "{:>label_width$}  {}",
                label,
                Self::line(cells, &widths),
                label_width = label_width
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .zip(Column::ALL)
            .map(|((cell, width), column)| match column {
                Column::Value => format!("{:>width$}", cell, width = *width),
                _ => format!("{:<width$}", cell, width = *width),
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl ModelObserver for TableView {
    fn notify(&mut self, model: &SymbolsModel, event: ModelEvent) {
        match event {
            // rows from the old source must not outlive the reset
            ModelEvent::ResetBegin => self.order.clear(),
            ModelEvent::ResetEnd => self.refresh(model),
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use crate::core::image::{Image, Section, Symbol, SymbolKind};
    use crate::core::model::{Column, ModelEvent, SymbolsModel};

    use super::{SortOrder, TableView};

    fn image() -> Arc<Image> {
        let mut builder = Image::builder();
        let text = builder.section(Section::new(".text"));
        builder
            .symbol(Symbol::new("main", SymbolKind::Function, 0x401000).in_section(text))
            .symbol(Symbol::new("g_buf", SymbolKind::Object, 0x404000))
            .symbol(Symbol::new("_start", SymbolKind::Function, 0xa0).in_section(text));
        Arc::new(builder.finish())
    }

    fn model() -> SymbolsModel {
        let mut model = SymbolsModel::new();
        model.set_source(Some(image())).unwrap();
        model
    }

    #[test]
    fn source_order() {
        let model = model();
        let view = TableView::new(&model);
        assert_eq!(&[0, 1, 2], view.rows());
    }

    #[test]
    fn sorts_numerically() {
        let model = model();
        let mut view = TableView::new(&model);

        // "a0" would sort after "401000" as text
        view.set_sort(&model, Some((Column::Value, SortOrder::Ascending)));
        assert_eq!(&[2, 0, 1], view.rows());

        view.set_sort(&model, Some((Column::Value, SortOrder::Descending)));
        assert_eq!(&[1, 0, 2], view.rows());

        view.set_sort(&model, Some((Column::Name, SortOrder::Ascending)));
        assert_eq!(&[2, 1, 0], view.rows());
    }

    #[test]
    fn stable_sort() {
        let model = model();
        let mut view = TableView::new(&model);
        view.set_sort(&model, Some((Column::Type, SortOrder::Ascending)));
        assert_eq!(&[0, 2, 1], view.rows());
    }

    #[test]
    fn render() {
        let model = model();
        let view = TableView::new(&model).plain(true);
        let expected = concat!(
            "   Name    Type       Value  Section\n",
            "1  main    Function  401000  .text\n",
            "2  g_buf   Object    404000\n",
            "3  _start  Function      a0  .text\n",
        );
        assert_eq!(expected, view.render(&model));
    }

    #[test]
    fn follows_resets() {
        let mut model = model();
        let view = Rc::new(RefCell::new(TableView::new(&model)));
        let observer = view.clone();
        model.subscribe(move |m: &SymbolsModel, e: ModelEvent| {
            crate::core::model::ModelObserver::notify(&mut *observer.borrow_mut(), m, e)
        });

        view.borrow_mut()
            .set_sort(&model, Some((Column::Value, SortOrder::Ascending)));
        model.set_source(None).unwrap();
        assert!(view.borrow().rows().is_empty());

        model.set_source(Some(image())).unwrap();
        assert_eq!(&[2, 0, 1], view.borrow().rows());
    }
}
