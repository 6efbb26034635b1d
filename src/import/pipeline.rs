use std::borrow::Cow;

use crate::{
    detect::{SourceFormat, detect},
    formats::{self, Conversion},
    foundation::{error::SpliceResult, math::stable_id},
    import::options::ImportOptions,
    model::{project::Project, report::CompatibilityReport},
    report,
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Everything one import produces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImportOutcome {
    pub format: SourceFormat,
    pub project: Project,
    pub report: CompatibilityReport,
    /// Rendered conversion warnings, deduplicated, in the order they arose.
    pub warnings: Vec<String>,
}

/// Runs detection, parsing, conversion and reporting with one set of options.
#[derive(Clone, Debug, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Import the raw bytes of one project file named `filename`.
    #[tracing::instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub fn import(&self, filename: &str, bytes: &[u8]) -> SpliceResult<ImportOutcome> {
        let content = decode_input(bytes);
        let format = detect(filename, &content)?;
        let tree = formats::parse(format, &content)?;

        let project_id = stable_id(format.tag(), bytes);
        let Conversion { project, warnings } =
            formats::convert(&tree, &self.options, &project_id)?;
        let report = report::generate(&project, format, &tree);

        let mut rendered: Vec<String> = Vec::with_capacity(warnings.len());
        for w in warnings {
            let w = w.to_string();
            if !rendered.contains(&w) {
                rendered.push(w);
            }
        }

        tracing::debug!(
            format = %format,
            project = %project.id,
            layers = project.layers.len(),
            duration = project.duration,
            warnings = rendered.len(),
            "import finished"
        );
        Ok(ImportOutcome {
            format,
            project,
            report,
            warnings: rendered,
        })
    }
}

/// Import with default options.
pub fn import(filename: &str, bytes: &[u8]) -> SpliceResult<ImportOutcome> {
    Importer::default().import(filename, bytes)
}

/// Text of an input file: a UTF-8 byte-order mark is dropped and invalid
/// sequences are replaced.
pub fn decode_input(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/import/pipeline.rs"]
mod tests;
