//! XLSX writer

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::XlsxStyleTable;
use sheetforge_core::{
    cell::excel_serial, CellAddress, CfRuleType, CfValue, CellValue, Workbook, Worksheet,
};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook into an in-memory buffer
    pub fn write_to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        Self::write(workbook, &mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidWorkbook(
                "a workbook needs at least one worksheet".into(),
            ));
        }

        let mut zip = ZipWriter::new(writer);
        let style_table = XlsxStyleTable::build(workbook);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_doc_props(&mut zip, workbook)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, "xl/styles.xml", &style_table.to_styles_xml())?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let xml = Self::worksheet_xml(sheet, i, &style_table);
            Self::write_part(&mut zip, format!("xl/worksheets/sheet{}.xml", i + 1), &xml)?;
            log::debug!(
                "wrote sheet '{}' ({} cells, {} conditional formats)",
                sheet.name(),
                sheet.cell_count(),
                sheet.conditional_formats().len()
            );
        }

        zip.finish()?;
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        name: impl Into<String>,
        content: &str,
    ) -> XlsxResult<()> {
        zip.start_file(name.into(), SimpleFileOptions::default())?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");
        Self::write_part(zip, "[Content_Types].xml", &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut ZipWriter<W>) -> XlsxResult<()> {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;
        Self::write_part(zip, "_rels/.rels", content)
    }

    fn write_doc_props<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut titles = String::new();
        for sheet in workbook.worksheets() {
            titles.push_str(&format!("<vt:lpstr>{}</vt:lpstr>", escape(sheet.name())));
        }
        let app = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>sheetforge</Application>
    <HeadingPairs><vt:vector size="2" baseType="variant"><vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant><vt:variant><vt:i4>{count}</vt:i4></vt:variant></vt:vector></HeadingPairs>
    <TitlesOfParts><vt:vector size="{count}" baseType="lpstr">{titles}</vt:vector></TitlesOfParts>
</Properties>"#,
            count = workbook.sheet_count(),
            titles = titles
        );
        Self::write_part(zip, "docProps/app.xml", &app)?;

        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let core = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:creator>sheetforge</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{created}</dcterms:modified>
</cp:coreProperties>"#
        );
        Self::write_part(zip, "docProps/core.xml", &core)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name()),
                i + 1,
                i + 1
            ));
        }
        content.push_str("\n    </sheets>");

        let names = workbook.named_ranges();
        if !names.is_empty() {
            content.push_str("\n    <definedNames>");
            for name in names.iter() {
                content.push_str(&format!(
                    "\n        <definedName name=\"{}\">{}</definedName>",
                    escape(name.name.as_str()),
                    escape(name.refers_to.as_str())
                ));
            }
            content.push_str("\n    </definedNames>");
        }

        content.push_str("\n</workbook>");
        Self::write_part(zip, "xl/workbook.xml", &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            workbook.sheet_count() + 1
        ));
        Self::write_part(zip, "xl/_rels/workbook.xml.rels", &content)
    }

    fn worksheet_xml(sheet: &Worksheet, index: usize, style_table: &XlsxStyleTable) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        Self::write_sheet_views(&mut content, sheet);
        Self::write_columns(&mut content, sheet);

        content.push_str("\n    <sheetData>");
        let mut current_row: Option<u32> = None;
        for (row, col, cell) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();
            let xf_id = style_table.xf_id_for(index, cell.style_index);
            let style_attr = if xf_id != 0 {
                format!(" s=\"{}\"", xf_id)
            } else {
                String::new()
            };

            match &cell.value {
                // NaN and infinities have no SpreadsheetML number form
                CellValue::Number(n) if !n.is_finite() => content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"e\"><v>#NUM!</v></c>",
                    cell_ref, style_attr
                )),
                CellValue::Number(n) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    cell_ref, style_attr, n
                )),
                CellValue::DateTime(dt) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    cell_ref,
                    style_attr,
                    excel_serial(dt)
                )),
                CellValue::String(s) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                    cell_ref,
                    style_attr,
                    escape(s.as_str())
                )),
                CellValue::Boolean(b) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                    cell_ref,
                    style_attr,
                    u8::from(*b)
                )),
                CellValue::Empty => {
                    // Style-only cells keep their borders and fills
                    if xf_id != 0 {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{}/>",
                            cell_ref, style_attr
                        ));
                    }
                }
            }
        }
        if current_row.is_some() {
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>");

        Self::write_conditional_formatting(&mut content, sheet, index, style_table);

        content.push_str("\n</worksheet>");
        content
    }

    fn write_sheet_views(content: &mut String, sheet: &Worksheet) {
        let Some(panes) = sheet.freeze_panes() else {
            return;
        };

        let mut split = String::new();
        if panes.col > 0 {
            split.push_str(&format!(" xSplit=\"{}\"", panes.col));
        }
        if panes.row > 0 {
            split.push_str(&format!(" ySplit=\"{}\"", panes.row));
        }
        let active_pane = match (panes.row > 0, panes.col > 0) {
            (true, true) => "bottomRight",
            (true, false) => "bottomLeft",
            _ => "topRight",
        };

        content.push_str(&format!(
            "\n    <sheetViews>\n        <sheetView workbookViewId=\"0\">\n            <pane{} topLeftCell=\"{}\" activePane=\"{}\" state=\"frozen\"/>\n            <selection pane=\"{}\"/>\n        </sheetView>\n    </sheetViews>",
            split,
            panes.top_left_cell(),
            active_pane,
            active_pane
        ));
    }

    fn write_columns(content: &mut String, sheet: &Worksheet) {
        let widths = sheet.custom_column_widths();
        if widths.is_empty() {
            return;
        }
        content.push_str("\n    <cols>");
        for (col, width) in widths {
            content.push_str(&format!(
                "\n        <col min=\"{n}\" max=\"{n}\" width=\"{w}\" customWidth=\"1\"/>",
                n = col + 1,
                w = width
            ));
        }
        content.push_str("\n    </cols>");
    }

    fn write_conditional_formatting(
        content: &mut String,
        sheet: &Worksheet,
        sheet_index: usize,
        style_table: &XlsxStyleTable,
    ) {
        for (rule_idx, rule) in sheet.conditional_formats().iter().enumerate() {
            if rule.ranges.is_empty() {
                continue;
            }

            content.push_str(&format!(
                "\n    <conditionalFormatting sqref=\"{}\">",
                rule.sqref()
            ));

            let rule_type = rule.rule_type.xlsx_type();
            let priority = rule.priority.max(1);
            let dxf_attr = style_table
                .dxf_id_for(sheet_index, rule_idx)
                .map_or(String::new(), |id| format!(" dxfId=\"{}\"", id));

            match &rule.rule_type {
                CfRuleType::CellIs { operator, formula } => {
                    content.push_str(&format!(
                        "\n        <cfRule type=\"{}\" operator=\"{}\" priority=\"{}\"{}>\n            <formula>{}</formula>\n        </cfRule>",
                        rule_type,
                        operator.xlsx_operator(),
                        priority,
                        dxf_attr,
                        escape(formula.as_str())
                    ));
                }
                CfRuleType::ColorScale { colors } => {
                    content.push_str(&format!(
                        "\n        <cfRule type=\"{}\" priority=\"{}\">\n            <colorScale>",
                        rule_type, priority
                    ));
                    for stop in colors {
                        content.push_str(&Self::cfvo(&stop.threshold));
                    }
                    for stop in colors {
                        content.push_str(&format!(
                            "\n                <color rgb=\"{}\"/>",
                            stop.color.to_argb_hex()
                        ));
                    }
                    content.push_str("\n            </colorScale>\n        </cfRule>");
                }
                CfRuleType::DataBar {
                    min_value,
                    max_value,
                    color,
                } => {
                    content.push_str(&format!(
                        "\n        <cfRule type=\"{}\" priority=\"{}\">\n            <dataBar>",
                        rule_type, priority
                    ));
                    content.push_str(&Self::cfvo(min_value));
                    content.push_str(&Self::cfvo(max_value));
                    content.push_str(&format!(
                        "\n                <color rgb=\"{}\"/>\n            </dataBar>\n        </cfRule>",
                        color.to_argb_hex()
                    ));
                }
                CfRuleType::Top10 {
                    rank,
                    percent,
                    bottom,
                } => {
                    let percent_attr = if *percent { " percent=\"1\"" } else { "" };
                    let bottom_attr = if *bottom { " bottom=\"1\"" } else { "" };
                    content.push_str(&format!(
                        "\n        <cfRule type=\"{}\" priority=\"{}\" rank=\"{}\"{}{}{}/>",
                        rule_type, priority, rank, percent_attr, bottom_attr, dxf_attr
                    ));
                }
                CfRuleType::DuplicateValues => {
                    content.push_str(&format!(
                        "\n        <cfRule type=\"{}\" priority=\"{}\"{}/>",
                        rule_type, priority, dxf_attr
                    ));
                }
            }

            content.push_str("\n    </conditionalFormatting>");
        }
    }

    fn cfvo(value: &CfValue) -> String {
        let val_attr = value
            .value
            .as_ref()
            .map_or(String::new(), |v| format!(" val=\"{}\"", escape(v.as_str())));
        format!(
            "\n                <cfvo type=\"{}\"{}/>",
            value.value_type.xlsx_type(),
            val_attr
        )
    }
}
