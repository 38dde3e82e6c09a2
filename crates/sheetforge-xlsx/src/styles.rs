//! styles.xml generation

use std::collections::HashMap;

use quick_xml::escape::escape;

use sheetforge_core::style::{
    Alignment, BorderStyle, Color, FillStyle, FontStyle, HorizontalAlignment, NumberFormat, Style,
};
use sheetforge_core::Workbook;

/// First id available for custom number formats
const FIRST_CUSTOM_NUMFMT_ID: u32 = 164;

/// Workbook-wide style table: merges every sheet's style pool into one
/// `cellXfs` list and collects conditional-format differential styles
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Deduplicated styles; the index is the `cellXfs` id
    styles: Vec<Style>,
    /// Per sheet: local style index to global xf id
    sheet_maps: Vec<HashMap<u32, u32>>,
    dxf_styles: Vec<Style>,
    /// (sheet index, rule index) to dxf id
    dxf_map: HashMap<(usize, usize), u32>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles = vec![Style::default()];
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();
        style_to_xf.insert(Style::default(), 0);

        let mut sheet_maps = Vec::with_capacity(workbook.sheet_count());
        let mut dxf_styles: Vec<Style> = Vec::new();
        let mut dxf_ids: HashMap<Style, u32> = HashMap::new();
        let mut dxf_map = HashMap::new();

        for (sheet_idx, sheet) in workbook.worksheets().enumerate() {
            let mut map = HashMap::new();
            for (local_idx, style) in sheet.styles() {
                let xf_id = *style_to_xf.entry(style.clone()).or_insert_with(|| {
                    styles.push(style.clone());
                    (styles.len() - 1) as u32
                });
                map.insert(local_idx, xf_id);
            }
            sheet_maps.push(map);

            for (rule_idx, rule) in sheet.conditional_formats().iter().enumerate() {
                let Some(format) = rule.format.as_ref() else {
                    continue;
                };
                if !rule.rule_type.uses_dxf() {
                    continue;
                }
                let dxf_id = *dxf_ids.entry(format.clone()).or_insert_with(|| {
                    dxf_styles.push(format.clone());
                    (dxf_styles.len() - 1) as u32
                });
                dxf_map.insert((sheet_idx, rule_idx), dxf_id);
            }
        }

        log::debug!(
            "style table: {} cell formats, {} differential formats",
            styles.len(),
            dxf_styles.len()
        );

        Self {
            styles,
            sheet_maps,
            dxf_styles,
            dxf_map,
        }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    /// dxf id of a conditional format rule that carries a style
    pub(crate) fn dxf_id_for(&self, sheet_index: usize, rule_index: usize) -> Option<u32> {
        self.dxf_map.get(&(sheet_index, rule_index)).copied()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut fonts: Vec<&FontStyle> = Vec::new();
        let mut font_ids: HashMap<&FontStyle, u32> = HashMap::new();
        let mut fills: Vec<Color> = Vec::new();
        let mut fill_ids: HashMap<Color, u32> = HashMap::new();
        let mut borders: Vec<&BorderStyle> = Vec::new();
        let mut border_ids: HashMap<&BorderStyle, u32> = HashMap::new();
        let mut numfmts: Vec<(u32, &str)> = Vec::new();
        let mut numfmt_ids: HashMap<&str, u32> = HashMap::new();

        let mut resolved = Vec::with_capacity(self.styles.len());
        for style in &self.styles {
            let font_id = *font_ids.entry(&style.font).or_insert_with(|| {
                fonts.push(&style.font);
                (fonts.len() - 1) as u32
            });

            // Fills 0 and 1 are reserved for "none" and "gray125"
            let fill_id = match style.fill.color() {
                None => 0,
                Some(color) => *fill_ids.entry(color).or_insert_with(|| {
                    fills.push(color);
                    (fills.len() + 1) as u32
                }),
            };

            let border_id = *border_ids.entry(&style.border).or_insert_with(|| {
                borders.push(&style.border);
                (borders.len() - 1) as u32
            });

            let num_fmt_id = match &style.number_format {
                NumberFormat::Custom(code) => *numfmt_ids.entry(code.as_str()).or_insert_with(|| {
                    let id = FIRST_CUSTOM_NUMFMT_ID + numfmts.len() as u32;
                    numfmts.push((id, code.as_str()));
                    id
                }),
                builtin => builtin.builtin_id().unwrap_or(0),
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape(*code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for color in &fills {
            xml.push_str(&format!(
                "\n    <fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
                write_color("fgColor", color)
            ));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>"#,
        );

        if self.dxf_styles.is_empty() {
            xml.push_str("\n  <dxfs count=\"0\"/>");
        } else {
            xml.push_str(&format!("\n  <dxfs count=\"{}\">", self.dxf_styles.len()));
            for dxf in &self.dxf_styles {
                xml.push_str("\n    ");
                xml.push_str(&write_dxf(dxf));
            }
            xml.push_str("\n  </dxfs>");
        }

        xml.push_str("\n</styleSheet>");
        xml
    }
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} indexed=\"64\"/>"),
        other => format!("<{tag} rgb=\"{}\"/>", other.to_argb_hex()),
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    s.push_str(&format!("<name val=\"{}\"/>", escape(font.name.as_str())));
    s.push_str("</font>");
    s
}

fn write_border(border: &BorderStyle) -> String {
    let mut s = String::from("<border>");
    for (tag, edge) in border.edges() {
        match edge.and_then(|e| e.style.xlsx_name().map(|name| (name, e.color))) {
            Some((name, color)) => s.push_str(&format!(
                "<{tag} style=\"{name}\">{}</{tag}>",
                write_color("color", &color)
            )),
            None => s.push_str(&format!("<{tag}/>")),
        }
    }
    s.push_str("<diagonal/></border>");
    s
}

fn write_alignment(al: &Alignment) -> String {
    let mut attrs = String::new();
    if al.horizontal != HorizontalAlignment::General {
        attrs.push_str(&format!(" horizontal=\"{}\"", al.horizontal.xlsx_name()));
    }
    if al.wrap_text {
        attrs.push_str(" wrapText=\"1\"");
    }
    if attrs.is_empty() {
        String::new()
    } else {
        format!("<alignment{attrs}/>")
    }
}

fn write_xf(style: &Style, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if style.font != FontStyle::default() {
        attrs.push_str(" applyFont=\"1\"");
    }
    if !style.fill.is_none() {
        attrs.push_str(" applyFill=\"1\"");
    }
    if !style.border.is_empty() {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if style.alignment != Alignment::default() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let head = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs
    );
    let alignment = write_alignment(&style.alignment);
    if alignment.is_empty() {
        format!("{head}/>")
    } else {
        format!("{head}>{alignment}</xf>")
    }
}

/// Differential format; solid fills go in `bgColor` as Excel expects for dxfs
fn write_dxf(style: &Style) -> String {
    let mut s = String::from("<dxf>");
    if style.font != FontStyle::default() {
        s.push_str("<font>");
        if style.font.bold {
            s.push_str("<b/>");
        }
        s.push_str("</font>");
    }
    if let FillStyle::Solid { color } = &style.fill {
        s.push_str(&format!(
            "<fill><patternFill patternType=\"solid\">{}</patternFill></fill>",
            write_color("bgColor", color)
        ));
    }
    if !style.border.is_empty() {
        s.push_str(&write_border(&style.border));
    }
    s.push_str("</dxf>");
    s
}
