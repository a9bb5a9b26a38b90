use crate::application::read_models::SbomReadModel;
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::services::{TabularExporter, TABULAR_COLUMNS};
use crate::shared::Result;
use anyhow::Context;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Component sheet column widths, in characters
const COMPONENT_COLUMN_WIDTHS: [u32; 12] = [30, 12, 20, 20, 40, 40, 18, 12, 12, 50, 15, 12];
const SUMMARY_COLUMN_WIDTHS: [u32; 2] = [20, 40];

/// Approximate points per character at the default font
const POINTS_PER_CHAR: u32 = 7;

/// SpreadsheetFormatter adapter producing an XML Spreadsheet 2003 workbook
///
/// The workbook has a `Components` sheet with the tabular rows and a
/// `Summary` sheet describing the SBOM. Every cell is written as a string.
pub struct SpreadsheetFormatter;

impl SpreadsheetFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpreadsheetFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for SpreadsheetFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer
            .get_mut()
            .write_all(b"\n<?mso-application progid=\"Excel.Sheet\"?>")?;

        writer.write_event(Event::Start(BytesStart::new("Workbook").with_attributes([
            ("xmlns", SPREADSHEET_NS),
            ("xmlns:ss", SPREADSHEET_NS),
        ])))?;
        write_styles(&mut writer)?;

        let header: Vec<String> = TABULAR_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut component_rows = vec![header];
        component_rows.extend(
            TabularExporter::rows(&model.components, &model.vulnerabilities)
                .iter()
                .map(|row| row.cells().iter().map(|c| c.to_string()).collect()),
        );
        write_sheet(&mut writer, "Components", &COMPONENT_COLUMN_WIDTHS, &component_rows, true)?;

        write_sheet(
            &mut writer,
            "Summary",
            &SUMMARY_COLUMN_WIDTHS,
            &summary_rows(model),
            false,
        )?;

        writer.write_event(Event::End(BytesEnd::new("Workbook")))?;

        String::from_utf8(writer.into_inner()).context("Spreadsheet output is not valid UTF-8")
    }
}

fn summary_rows(model: &SbomReadModel) -> Vec<Vec<String>> {
    let pair = |label: &str, value: &str| vec![label.to_string(), value.to_string()];
    vec![
        vec!["SBOM Report".to_string()],
        Vec::new(),
        pair("Project", &model.project.name),
        pair("SBOM Version", &model.project.version),
        pair("Format", &model.stored_format.as_str().to_uppercase()),
        pair("Created", model.metadata.timestamp()),
        pair("Author", model.project.author.as_deref().unwrap_or("Unknown")),
        pair("Total Components", &model.components.len().to_string()),
    ]
}

fn write_styles(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Styles")))?;
    writer.write_event(Event::Start(
        BytesStart::new("Style").with_attributes([("ss:ID", "header")]),
    ))?;
    writer.write_event(Event::Empty(
        BytesStart::new("Font").with_attributes([("ss:Bold", "1")]),
    ))?;
    writer.write_event(Event::End(BytesEnd::new("Style")))?;
    writer.write_event(Event::End(BytesEnd::new("Styles")))?;
    Ok(())
}

/// Writes one worksheet; when `header` is set the first row is bold
fn write_sheet(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    widths: &[u32],
    rows: &[Vec<String>],
    header: bool,
) -> Result<()> {
    writer.write_event(Event::Start(
        BytesStart::new("Worksheet").with_attributes([("ss:Name", name)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("Table")))?;

    for width in widths {
        let points = (width * POINTS_PER_CHAR).to_string();
        writer.write_event(Event::Empty(
            BytesStart::new("Column").with_attributes([("ss:Width", points.as_str())]),
        ))?;
    }

    for (index, cells) in rows.iter().enumerate() {
        writer.write_event(Event::Start(BytesStart::new("Row")))?;
        for value in cells {
            let mut cell = BytesStart::new("Cell");
            if header && index == 0 {
                cell.push_attribute(("ss:StyleID", "header"));
            }
            writer.write_event(Event::Start(cell))?;
            writer.write_event(Event::Start(
                BytesStart::new("Data").with_attributes([("ss:Type", "String")]),
            ))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new("Data")))?;
            writer.write_event(Event::End(BytesEnd::new("Cell")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Row")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Table")))?;
    writer.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    Ok(())
}
