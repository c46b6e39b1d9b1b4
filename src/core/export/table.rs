use scraper::{ElementRef, Html, Selector};

/// A table extracted from chunk markup.
#[derive(Debug, PartialEq, Eq)]
pub struct TableGrid {
    /// Contents of the `<th>` cells.
    pub header: Vec<String>,

    /// Body rows. Every `<tr>` after the first, rows without cells
    /// are skipped.
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Parse table markup into a grid. Returns `None` when the markup
    /// contains no `<table>` element.
    pub fn from_markup(markup: &str) -> Option<TableGrid> {
        let html = Html::parse_fragment(markup);

        // Static selectors, always valid.
        let table = Selector::parse("table").expect("invalid selector");
        let th = Selector::parse("th").expect("invalid selector");
        let tr = Selector::parse("tr").expect("invalid selector");
        let cell = Selector::parse("td, th").expect("invalid selector");

        let table = html.select(&table).next()?;

        let header: Vec<String> = table.select(&th).map(cell_text).collect();

        let mut rows = vec![];
        for row in table.select(&tr) {
            let cells: Vec<String> = row.select(&cell).map(cell_text).collect();
            if !cells.is_empty() {
                rows.push(cells);
            }
        }

        // The first row carries the header cells.
        let rows = rows.into_iter().skip(1).collect();

        Some(TableGrid { header, rows })
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_body_rows() {
        let markup =
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";

        let grid = TableGrid::from_markup(markup).unwrap();

        assert_eq!(vec!["A".to_string(), "B".to_string()], grid.header);
        assert_eq!(vec![vec!["1".to_string(), "2".to_string()]], grid.rows);
    }

    #[test]
    fn no_table_element_yields_none() {
        assert!(TableGrid::from_markup("plain text, no markup").is_none());
        assert!(TableGrid::from_markup("<p>not a table</p>").is_none());
    }

    #[test]
    fn rows_without_cells_are_skipped() {
        let markup =
            "<table><tr><th>A</th></tr><tr></tr><tr><td>1</td></tr></table>";

        let grid = TableGrid::from_markup(markup).unwrap();

        assert_eq!(vec!["A".to_string()], grid.header);
        assert_eq!(vec![vec!["1".to_string()]], grid.rows);
    }

    #[test]
    fn headerless_table_drops_first_row() {
        let markup = "<table><tr><td>1</td></tr><tr><td>2</td></tr></table>";

        let grid = TableGrid::from_markup(markup).unwrap();

        assert!(grid.header.is_empty());
        assert_eq!(vec![vec!["2".to_string()]], grid.rows);
    }

    #[test]
    fn cell_text_is_trimmed() {
        let markup = "<table><tr><th> A </th></tr><tr><td> spaced out </td></tr></table>";

        let grid = TableGrid::from_markup(markup).unwrap();

        assert_eq!(vec!["A".to_string()], grid.header);
        assert_eq!(vec![vec!["spaced out".to_string()]], grid.rows);
    }

    #[test]
    fn nested_markup_in_cells_flattens() {
        let markup = "<table><tr><th><b>A</b></th></tr><tr><td><i>1</i>x</td></tr></table>";

        let grid = TableGrid::from_markup(markup).unwrap();

        assert_eq!(vec!["A".to_string()], grid.header);
        assert_eq!(vec![vec!["1x".to_string()]], grid.rows);
    }
}
