use std::fmt;

/// File roles recognised by the generator.
///
/// Declaration order is the order category roots are declared in the filter
/// descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Source,
    Header,
    Resource,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Source, Category::Header, Category::Resource];

    /// Name of the category's root virtual folder.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Source => "Source Files",
            Self::Header => "Header Files",
            Self::Resource => "Resource Files",
        }
    }

    /// Item element used for files of this category in both descriptors.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Source => "ClCompile",
            Self::Header => "ClInclude",
            Self::Resource => "None",
        }
    }

    /// Fixed identifier of the category's root folder.
    pub fn root_identifier(&self) -> &'static str {
        match self {
            Self::Source => "{4FC737F1-C7A5-4376-A066-2A32D752A2FF}",
            Self::Header => "{93995380-89BD-4b04-88EB-625FBE52EBFB}",
            Self::Resource => "{67DA6AB6-F800-4c08-8B7A-83BB121AAD01}",
        }
    }

    /// Extensions advertised on the root folder declaration.
    ///
    /// These are what the IDE uses for new files and intentionally differ from
    /// the lists used for classification.
    pub fn root_extensions(&self) -> &'static str {
        match self {
            Self::Source => "cpp;c;cc;cxx;def;odl;idl;hpj;bat;asm;asmx",
            Self::Header => "h;hpp;hxx;hm;inl;inc;xsd",
            Self::Resource => {
                "rc;ico;cur;bmp;dlg;rc2;rct;bin;rgs;gif;jpg;jpeg;jpe;resx;tiff;tif;png;wav;mfcribbon-ms"
            }
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Source => 0,
            Self::Header => 1,
            Self::Resource => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub const SOURCE_EXTENSIONS: &[&str] = &[".c", ".cpp", ".def", ".cxx", ".cc", ".c++", ".cp"];
pub const HEADER_EXTENSIONS: &[&str] = &[".h", ".hpp", ".hxx", ".hm", ".inl", ".inc", ".xsd"];
pub const RESOURCE_EXTENSIONS: &[&str] = &[".rc", ".ico", ".bmp", ".rc2", ".mk"];

/// Name of the build driver's control file; always listed with resources.
pub const MARKER_FILE: &str = "Makefile";

/// Extensions that place a file into one category.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: Category,
    pub extensions: Vec<String>,
}

impl CategoryRule {
    pub fn new<I>(category: Category, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            category,
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_string())
                .collect(),
        }
    }

    fn matches(&self, file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }
}

/// Assigns file names to categories by extension, with a list of literal
/// names that always go to [`Category::Resource`].
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    resource_names: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(
            vec![
                CategoryRule::new(Category::Source, SOURCE_EXTENSIONS.iter().copied()),
                CategoryRule::new(Category::Header, HEADER_EXTENSIONS.iter().copied()),
                CategoryRule::new(Category::Resource, RESOURCE_EXTENSIONS.iter().copied()),
            ],
            [MARKER_FILE],
        )
    }
}

impl Classifier {
    /// Rules are tried in the given order; the first match wins.
    pub fn new<I>(rules: Vec<CategoryRule>, resource_names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            rules,
            resource_names: resource_names
                .into_iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
        }
    }

    pub fn classify(&self, file_name: &str) -> Option<Category> {
        if self.resource_names.iter().any(|name| name == file_name) {
            return Some(Category::Resource);
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(file_name))
            .map(|rule| rule.category)
    }
}
