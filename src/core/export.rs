use self::table::TableGrid;
use crate::{
    core::model::chunk::{Chunk, ChunkType},
    error::ChunkviewError,
};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point,
};
use std::{fs, io::Cursor, path::PathBuf};
use tracing::debug;

pub mod table;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: Mm = Mm(15.0);
const FONT_SIZE: f32 = 8.0;
const LINE_HEIGHT: Mm = Mm(5.0);
const CELL_WIDTH: Mm = Mm(40.0);
const CELL_HEIGHT: Mm = Mm(8.0);
/// Approximate advance of one glyph at [FONT_SIZE] for a fixed width font.
const CHAR_WIDTH: Mm = Mm(1.7);

/// Where the exporter gets its fonts from.
#[derive(Debug, Clone)]
pub enum FontConfig {
    /// Embed fonts from TTF files. Covers whatever unicode range the
    /// configured font does, so extracted text renders as-is.
    Embedded { regular: PathBuf, bold: PathBuf },

    /// The builtin Courier fonts. WinAnsi only, used in tests.
    Builtin,
}

enum Fonts {
    Embedded { regular: Vec<u8>, bold: Vec<u8> },
    Builtin,
}

/// Re-renders parsed chunks into a PDF document, one section per chunk.
pub struct PdfExporter {
    fonts: Fonts,
}

impl PdfExporter {
    /// Load the configured fonts. Fonts are loaded once at startup,
    /// a missing font file is a configuration error.
    pub fn new(config: FontConfig) -> Result<Self, ChunkviewError> {
        let fonts = match config {
            FontConfig::Embedded { regular, bold } => Fonts::Embedded {
                regular: fs::read(regular)?,
                bold: fs::read(bold)?,
            },
            FontConfig::Builtin => Fonts::Builtin,
        };
        Ok(Self { fonts })
    }

    /// Render one section per chunk, in input order. Each section starts
    /// with a heading identifying the chunk's ordinal position, page and
    /// type. Table chunks render their markup as a bordered grid, all
    /// other chunks render their text as a wrapped paragraph. Sections
    /// are separated by a dashed line.
    ///
    /// Returns the finalized document bytes.
    pub fn render(&self, chunks: &[Chunk]) -> Result<Vec<u8>, ChunkviewError> {
        let (doc, page, layer) = PdfDocument::new("parsed_chunks", PAGE_WIDTH, PAGE_HEIGHT, "base");
        let (regular, bold) = self.register_fonts(&doc)?;

        let mut writer = PageWriter::new(&doc, page, layer);

        for (idx, chunk) in chunks.iter().enumerate() {
            writer.text_line(&format!("Chunk {}:", idx + 1), &bold);
            writer.text_line(&format!("Page: {}", chunk.page_display()), &regular);
            writer.text_line(&format!("Type: {}", chunk.chunk_type), &regular);

            if let ChunkType::Table = chunk.chunk_type {
                writer.text_line("Table:", &bold);
                // Malformed markup degrades to an empty render, it must
                // never abort the remaining chunks.
                if let Some(grid) = TableGrid::from_markup(&chunk.text) {
                    writer.table(&grid, &regular, &bold);
                }
            } else {
                for line in wrap(&format!("Text:\n{}", chunk.text), max_chars()) {
                    writer.text_line(&line, &regular);
                }
            }

            writer.advance(Mm(2.0));
            writer.text_line(&"-".repeat(50), &regular);
            writer.advance(Mm(5.0));
        }

        debug!("Rendered {} chunk(s)", chunks.len());

        Ok(doc.save_to_bytes()?)
    }

    fn register_fonts(
        &self,
        doc: &PdfDocumentReference,
    ) -> Result<(IndirectFontRef, IndirectFontRef), ChunkviewError> {
        match &self.fonts {
            Fonts::Embedded { regular, bold } => Ok((
                doc.add_external_font(Cursor::new(regular))?,
                doc.add_external_font(Cursor::new(bold))?,
            )),
            Fonts::Builtin => Ok((
                doc.add_builtin_font(BuiltinFont::Courier)?,
                doc.add_builtin_font(BuiltinFont::CourierBold)?,
            )),
        }
    }
}

/// Number of glyphs that fit between the margins.
fn max_chars() -> usize {
    ((PAGE_WIDTH.0 - 2.0 * MARGIN.0) / CHAR_WIDTH.0) as usize
}

/// Number of glyphs that fit in a table cell, with padding.
fn cell_chars() -> usize {
    ((CELL_WIDTH.0 - 3.0) / CHAR_WIDTH.0) as usize
}

/// Tracks the current layer and write position. `y` is the top edge of
/// the next element, pages break when an element would cross the bottom
/// margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, page: PdfPageIndex, layer: PdfLayerIndex) -> Self {
        Self {
            doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page(&mut self, height: Mm) {
        if self.y - height < MARGIN {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "base");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text_line(&mut self, text: &str, font: &IndirectFontRef) {
        self.break_page(LINE_HEIGHT);
        self.layer
            .use_text(text, FONT_SIZE, MARGIN, self.y - LINE_HEIGHT + Mm(1.0), font);
        self.y = self.y - LINE_HEIGHT;
    }

    fn table(&mut self, grid: &TableGrid, regular: &IndirectFontRef, bold: &IndirectFontRef) {
        if !grid.header.is_empty() {
            self.row(&grid.header, bold);
        }
        for row in &grid.rows {
            self.row(row, regular);
        }
        self.advance(Mm(2.0));
    }

    /// One table row, one bordered fixed width cell per column.
    fn row(&mut self, cells: &[String], font: &IndirectFontRef) {
        self.break_page(CELL_HEIGHT);

        let mut x = MARGIN;
        for cell in cells {
            self.border(x, self.y, CELL_WIDTH, CELL_HEIGHT);

            let text: String = cell.chars().take(cell_chars()).collect();
            self.layer.use_text(
                text,
                FONT_SIZE,
                x + Mm(1.5),
                self.y - CELL_HEIGHT + Mm(2.5),
                font,
            );

            x = x + CELL_WIDTH;
        }

        self.y = self.y - CELL_HEIGHT;
    }

    fn border(&self, x: Mm, y: Mm, width: Mm, height: Mm) {
        let points = vec![
            (Point::new(x, y), false),
            (Point::new(x + width, y), false),
            (Point::new(x + width, y - height), false),
            (Point::new(x, y - height), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: true,
        });
    }

    fn advance(&mut self, height: Mm) {
        self.y = self.y - height;
    }
}

/// Wrap `text` to `width` glyphs per line, preserving existing line
/// breaks and splitting on whitespace. Words longer than a full line
/// are hard broken.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = vec![];

    for source in text.lines() {
        let mut current = String::new();
        let mut count = 0;

        for word in source.split_whitespace() {
            let len = word.chars().count();

            if count > 0 && count + 1 + len > width {
                lines.push(std::mem::take(&mut current));
                count = 0;
            }

            if len > width {
                for ch in word.chars() {
                    if count == width {
                        lines.push(std::mem::take(&mut current));
                        count = 0;
                    }
                    current.push(ch);
                    count += 1;
                }
                continue;
            }

            if count > 0 {
                current.push(' ');
                count += 1;
            }
            current.push_str(word);
            count += len;
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::chunk::Grounding;

    fn exporter() -> PdfExporter {
        PdfExporter::new(FontConfig::Builtin).unwrap()
    }

    fn chunk(text: &str, chunk_type: ChunkType, page: Option<u32>) -> Chunk {
        Chunk {
            text: text.to_string(),
            chunk_type,
            grounding: page.map(|page| Grounding { page }).into_iter().collect(),
        }
    }

    fn extract_all_text(file: &[u8]) -> String {
        let doc = lopdf::Document::load_mem(file).unwrap();
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        doc.extract_text(&pages).unwrap()
    }

    fn embedded_font_names(file: &[u8]) -> Vec<String> {
        let doc = lopdf::Document::load_mem(file).unwrap();
        doc.objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter(|dict| {
                matches!(dict.get(b"Type"), Ok(lopdf::Object::Name(name)) if name == b"Font")
            })
            .filter_map(|dict| dict.get(b"BaseFont").ok())
            .filter_map(|base| base.as_name().ok())
            .map(|name| String::from_utf8_lossy(name).to_string())
            .collect()
    }

    #[test]
    fn renders_single_text_chunk() {
        let chunks = [chunk("Hello", ChunkType::Text, Some(0))];

        let file = exporter().render(&chunks).unwrap();

        assert!(!file.is_empty());
        assert!(file.starts_with(b"%PDF"));

        let doc = lopdf::Document::load_mem(&file).unwrap();
        assert_eq!(1, doc.get_pages().len());
    }

    #[test]
    fn renders_empty_input() {
        let file = exporter().render(&[]).unwrap();
        assert!(file.starts_with(b"%PDF"));
    }

    #[test]
    fn one_heading_block_per_chunk_in_input_order() {
        let chunks = [
            chunk("first", ChunkType::Title, Some(0)),
            chunk("<table><tr><th>A</th></tr></table>", ChunkType::Table, Some(0)),
            chunk("third", ChunkType::Figure, None),
        ];

        let file = exporter().render(&chunks).unwrap();
        let text = extract_all_text(&file);

        let first = text.find("Chunk 1:").unwrap();
        let second = text.find("Chunk 2:").unwrap();
        let third = text.find("Chunk 3:").unwrap();

        assert!(first < second && second < third);
        assert!(text.contains("Page: N/A"));
    }

    #[test]
    fn renders_table_markup_as_grid() {
        let markup =
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        let chunks = [chunk(markup, ChunkType::Table, Some(1))];

        let file = exporter().render(&chunks).unwrap();
        let text = extract_all_text(&file);

        assert!(text.contains("Table:"));
        for cell in ["A", "B", "1", "2"] {
            assert!(text.contains(cell), "missing cell {cell}");
        }

        // Header cells use the bold font, so both weights must be
        // registered in the document.
        let fonts = embedded_font_names(&file);
        assert!(fonts.iter().any(|font| font == "Courier"));
        assert!(fonts.iter().any(|font| font == "Courier-Bold"));
    }

    #[test]
    fn table_chunk_without_markup_degrades_gracefully() {
        let chunks = [
            chunk("no markup here", ChunkType::Table, Some(0)),
            chunk("still rendered", ChunkType::Text, Some(0)),
        ];

        let file = exporter().render(&chunks).unwrap();
        let text = extract_all_text(&file);

        // Heading lines only for the table chunk, the next chunk is intact.
        assert!(text.contains("Chunk 1:"));
        assert!(text.contains("Chunk 2:"));
        assert!(text.contains("still rendered"));
        assert!(!text.contains("no markup here"));
    }

    #[test]
    fn long_text_breaks_pages() {
        let text = "lorem ipsum dolor sit amet ".repeat(400);
        let chunks = [chunk(&text, ChunkType::Text, Some(0))];

        let file = exporter().render(&chunks).unwrap();

        let doc = lopdf::Document::load_mem(&file).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn wrap_preserves_line_breaks() {
        let lines = wrap("Text:\nfoo bar", 80);
        assert_eq!(vec!["Text:".to_string(), "foo bar".to_string()], lines);
    }

    #[test]
    fn wrap_splits_on_whitespace() {
        let lines = wrap("aaa bbb ccc", 7);
        assert_eq!(vec!["aaa bbb".to_string(), "ccc".to_string()], lines);
    }

    #[test]
    fn wrap_hard_breaks_oversized_words() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()],
            lines
        );
    }

    #[test]
    fn missing_font_file_is_fatal() {
        let result = PdfExporter::new(FontConfig::Embedded {
            regular: "does/not/exist.ttf".into(),
            bold: "does/not/exist.ttf".into(),
        });

        assert!(result.is_err());
    }
}
