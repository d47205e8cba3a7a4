//! Serializers for the two Visual Studio project files.
//!
//! Both descriptors are rendered from the same [`ProjectModel`] through
//! embedded Tera templates, then encoded the way Visual Studio writes them:
//! UTF-8 with a byte-order mark and CRLF line endings.

mod filters;
mod project;

pub use project::ProjectSettings;

use crate::{classify::Category, config::BuildConfig, tree::ProjectModel};
use miette::Diagnostic;
use tera::{Context, Tera};
use thiserror::Error;

const PROJECT_TEMPLATE: &str = "project.vcxproj";
const FILTERS_TEMPLATE: &str = "project.vcxproj.filters";

/// Suffix appended to the project file name for the filter descriptor.
pub const FILTERS_SUFFIX: &str = ".filters";

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("Error occurred attempting to initialize tera instance")]
    #[diagnostic(code(vcxgen::descriptor::tera_instance_initialization))]
    TeraInstanceInitialization {
        #[source]
        source: tera::Error,
    },

    #[error("Error occurred attempting to render '{template}'")]
    #[diagnostic(code(vcxgen::descriptor::render))]
    Render {
        template: &'static str,
        #[source]
        source: tera::Error,
    },
}

/// Holds the compiled descriptor templates.
pub struct Descriptors {
    tera: Tera,
}

impl Descriptors {
    pub fn new() -> Result<Self, DescriptorError> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            (
                PROJECT_TEMPLATE,
                include_str!("../../templates/project.vcxproj.tera"),
            ),
            (
                FILTERS_TEMPLATE,
                include_str!("../../templates/project.vcxproj.filters.tera"),
            ),
        ])
        .map_err(|error| DescriptorError::TeraInstanceInitialization { source: error })?;

        Ok(Self { tera })
    }

    /// Renders the flat build-configuration descriptor.
    pub fn render_project(
        &self,
        model: &ProjectModel,
        settings: &ProjectSettings,
        config: &BuildConfig,
    ) -> Result<String, DescriptorError> {
        let context = project::make_context(model, settings, config);

        self.render(PROJECT_TEMPLATE, &context)
    }

    /// Renders the nested filter descriptor.
    pub fn render_filters(&self, model: &ProjectModel) -> Result<String, DescriptorError> {
        let context = filters::make_context(model);

        self.render(FILTERS_TEMPLATE, &context)
    }

    fn render(&self, template: &'static str, context: &Context) -> Result<String, DescriptorError> {
        self.tera
            .render(template, context)
            .map_err(|error| DescriptorError::Render {
                template,
                source: error,
            })
    }
}

/// Encodes rendered markup as BOM-prefixed UTF-8 with CRLF line endings.
pub fn encode(rendered: &str) -> Vec<u8> {
    let mut out = String::with_capacity(rendered.len() + UTF8_BOM.len());
    out.push_str(UTF8_BOM);

    for line in rendered.trim_end().lines() {
        out.push_str(line);
        out.push_str("\r\n");
    }

    out.into_bytes()
}

/// `<Tag Include="...">` element name plus the entries of one category.
#[derive(Debug, serde::Serialize)]
struct ItemGroupView<'a> {
    element: &'static str,
    entries: Vec<EntryView<'a>>,
}

#[derive(Debug, serde::Serialize)]
struct EntryView<'a> {
    include: &'a str,
    filter: &'a str,
}

fn item_group(model: &ProjectModel, category: Category) -> ItemGroupView<'_> {
    ItemGroupView {
        element: category.element(),
        entries: model
            .entries(category)
            .iter()
            .map(|entry| EntryView {
                include: &entry.include,
                filter: model.filter_of(entry),
            })
            .collect(),
    }
}
