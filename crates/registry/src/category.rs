use std::fmt;

/// Permission categories tracked by the registry.
///
/// Each category corresponds to one kind of component a profile can refer
/// to. Labels are the spellings used by manual rows, reports and logs;
/// manifest type names are a separate, narrower vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ApexClass,
    ApexPage,
    CustomApplication,
    CustomObject,
    CustomTab,
    Field,
    Layout,
    RecordType,
    UserPermission,
}

impl Category {
    /// Every category, in canonical report order
    pub const ALL: [Category; 9] = [
        Category::ApexClass,
        Category::ApexPage,
        Category::CustomApplication,
        Category::CustomObject,
        Category::CustomTab,
        Category::Field,
        Category::Layout,
        Category::RecordType,
        Category::UserPermission,
    ];

    /// Canonical label, as used by manual rows and reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::ApexClass => "ApexClass",
            Category::ApexPage => "ApexPage",
            Category::CustomApplication => "CustomApplication",
            Category::CustomObject => "CustomObject",
            Category::CustomTab => "CustomTab",
            Category::Field => "fields",
            Category::Layout => "Layout",
            Category::RecordType => "recordTypes",
            Category::UserPermission => "userPermissions",
        }
    }

    /// Exact-match classification of a manual-row label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "ApexClass" => Some(Category::ApexClass),
            "ApexPage" => Some(Category::ApexPage),
            "CustomApplication" => Some(Category::CustomApplication),
            "CustomObject" => Some(Category::CustomObject),
            "CustomTab" => Some(Category::CustomTab),
            "fields" => Some(Category::Field),
            "Layout" => Some(Category::Layout),
            "recordTypes" => Some(Category::RecordType),
            "userPermissions" => Some(Category::UserPermission),
            _ => None,
        }
    }

    /// Manifest metadata types the registry absorbs members from.
    ///
    /// Fields and user permissions never arrive via the manifest: fields
    /// come from a reference profile, user permissions from manual rows.
    #[must_use]
    pub fn from_manifest_type(name: &str) -> Option<Category> {
        match name {
            "ApexClass" => Some(Category::ApexClass),
            "ApexPage" => Some(Category::ApexPage),
            "CustomApplication" => Some(Category::CustomApplication),
            "CustomObject" => Some(Category::CustomObject),
            "CustomTab" => Some(Category::CustomTab),
            "Layout" => Some(Category::Layout),
            "RecordType" => Some(Category::RecordType),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
