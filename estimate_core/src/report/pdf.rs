//! # PDF Rendering
//!
//! Renders an [`EstimateReport`] to PDF using Typst.
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via placeholder replacement before compilation
//! - Fonts come from `typst-assets`, so no system fonts are needed
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use estimate_core::calculations::{calculate, EstimateInput, UnitPrices};
//! use estimate_core::mix::ConcreteGrade;
//! use estimate_core::report::{render_estimate_pdf, EstimateReport, ReportOptions};
//!
//! let input = EstimateInput::new("Slab", 6.0, 4.0, 0.2, ConcreteGrade::M300, UnitPrices::default());
//! let result = calculate(&input).unwrap().unwrap();
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let report = EstimateReport::new(&input, &result, date, &ReportOptions::default());
//!
//! let pdf_bytes = render_estimate_pdf(&report).unwrap();
//! std::fs::write("estimate.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use super::{fixed, EstimateReport, REPORT_DATE_FORMAT};
use crate::errors::{CalcError, CalcResult};
use crate::mix::{CURING_MILESTONES, RECOMMENDATIONS};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed once per process.
struct FontSet {
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
}

impl FontSet {
    fn load() -> Self {
        let mut fonts = Vec::new();
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        FontSet {
            book: LazyHash::new(FontBook::from_fonts(&fonts)),
            fonts,
        }
    }
}

static FONTS: Lazy<FontSet> = Lazy::new(FontSet::load);

/// A minimal Typst world for compiling one in-memory document.
struct PdfWorld {
    main: Source,
    library: LazyHash<Library>,
    /// Reported to the document as "today"
    date: NaiveDate,
}

impl PdfWorld {
    fn new(source: String, date: NaiveDate) -> Self {
        PdfWorld {
            main: Source::detached(source),
            library: LazyHash::new(Library::default()),
            date,
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &FONTS.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        Datetime::from_ymd(self.date.year(), self.date.month() as u8, self.date.day() as u8)
    }
}

// ============================================================================
// Template
// ============================================================================

/// Typst template for an estimate
const ESTIMATE_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[{{TITLE}}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[No. {{REFERENCE}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "DejaVu Sans Mono", size: 10pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[CONCRETE WORKS ESTIMATE]
    #v(4pt)
    #text(size: 12pt)[{{OBJECT}}]
  ]
]

#v(12pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Object:], [{{OBJECT}}],
  [Date:], [{{DATE}}],
  [Reference:], [{{REFERENCE}}],
)

== Input Data

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [Length], [{{LENGTH}}], [m],
  [Width], [{{WIDTH}}], [m],
  [Height], [{{HEIGHT}}], [m],
  [Concrete grade], [{{GRADE}}], [],
  [Mix (C : S : G)], [{{MIX}}], [],
  [Total volume], [{{VOLUME}}], [m#super[3]],
)

== Material Consumption

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Material*], [*Quantity*], [*Unit*]),
  [Cement], [{{CEMENT_KG}} ({{CEMENT_BAGS}} bags)], [kg],
  [Sand], [{{SAND_T}}], [t],
  [Gravel], [{{GRAVEL_T}}], [t],
  [Water], [{{WATER_L}}], [L],
)

== Material Cost

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, right),
  table.header([*Material*], [*Unit price*], [*Cost*]),
  [Cement], [{{CEMENT_PRICE}} / bag], [{{CEMENT_COST}}],
  [Sand], [{{SAND_PRICE}} / t], [{{SAND_COST}}],
  [Gravel], [{{GRAVEL_PRICE}} / t], [{{GRAVEL_COST}}],
)

#v(12pt)

#align(center)[
  #block(width: auto, fill: rgb("#d4edda"), inset: 12pt, radius: 4pt)[
    #text(size: 14pt, weight: "bold")[TOTAL: {{TOTAL}}]
  ]
]

{{REFERENCE_SECTION}}

#v(32pt)
#line(length: 40%, stroke: 0.5pt)
#text(size: 9pt)[Signature of responsible person]
"##;

// ============================================================================
// Rendering
// ============================================================================

/// Render an estimate report to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::Internal)` - If Typst compilation or PDF export fails
pub fn render_estimate_pdf(report: &EstimateReport) -> CalcResult<Vec<u8>> {
    let source = build_source(report);
    let world = PdfWorld::new(source, report.date);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    Ok(pdf_bytes)
}

/// Fill the template with report data
fn build_source(report: &EstimateReport) -> String {
    let input = &report.input;
    let result = &report.result;
    let prices = &input.prices;
    let costs = result.costs(prices);
    let currency = escape_typst(&report.options.currency_symbol);
    let money = |amount: f64| format!("{} {}", fixed(amount, 0), currency);

    let object = if input.label.trim().is_empty() {
        report.options.object_name.as_str()
    } else {
        input.label.trim()
    };

    let reference_section = if report.options.include_reference {
        build_reference_section(report)
    } else {
        String::new()
    };

    let values = [
        ("TITLE", escape_typst(&report.title())),
        ("REFERENCE", report.reference()),
        ("DATE", report.date.format(REPORT_DATE_FORMAT).to_string()),
        ("OBJECT", escape_typst(object)),
        ("LENGTH", input.length_m.to_string()),
        ("WIDTH", input.width_m.to_string()),
        ("HEIGHT", input.height_m.to_string()),
        ("GRADE", input.grade.code().to_string()),
        ("MIX", escape_typst(&input.grade.ratio().notation())),
        ("VOLUME", fixed(result.volume_m3, 2)),
        ("CEMENT_KG", fixed(result.cement_kg, 0)),
        ("CEMENT_BAGS", fixed(result.cement_bags().value(), 1)),
        ("SAND_T", fixed(result.sand_tonnes().value(), 2)),
        ("GRAVEL_T", fixed(result.gravel_tonnes().value(), 2)),
        ("WATER_L", fixed(result.water_l, 0)),
        ("CEMENT_PRICE", money(prices.cement_per_bag)),
        ("SAND_PRICE", money(prices.sand_per_tonne)),
        ("GRAVEL_PRICE", money(prices.gravel_per_tonne)),
        ("CEMENT_COST", money(costs.cement)),
        ("SAND_COST", money(costs.sand)),
        ("GRAVEL_COST", money(costs.gravel)),
        ("TOTAL", money(result.total_cost)),
        ("REFERENCE_SECTION", reference_section),
    ];

    fill_placeholders(ESTIMATE_TEMPLATE, &values)
}

/// Replace every `{{KEY}}` in one left-to-right pass.
///
/// Substituted text is never scanned again. Unknown keys are left in place.
fn fill_placeholders(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn build_reference_section(report: &EstimateReport) -> String {
    let grade = report.input.grade;
    let milestone_rows = CURING_MILESTONES
        .iter()
        .map(|m| format!("  [{}], [{}],", escape_typst(m.label), escape_typst(m.age)))
        .collect::<Vec<_>>()
        .join("\n");
    let notes = RECOMMENDATIONS
        .iter()
        .map(|n| format!("- {}", escape_typst(n)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r##"
== Reference

Grade {grade}: {application}

#table(
  columns: (1fr, auto),
  inset: 6pt,
  stroke: 0.5pt,
  table.header([*Curing stage*], [*Age*]),
{milestone_rows}
)

{notes}
"##,
        grade = grade.code(),
        application = escape_typst(grade.application()),
        milestone_rows = milestone_rows,
        notes = notes,
    )
}

/// Escape special Typst markup characters, including comment starts (`//`, `/*`)
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '/' => "\\/".to_string(),
            '~' => "\\~".to_string(),
            '{' => "\\{".to_string(),
            '}' => "\\}".to_string(),
            _ => c.to_string(),
        })
        .collect()
}
