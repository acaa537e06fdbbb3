//! Reader options

/// Where a worksheet's display name comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SheetNameSource {
    /// The attribute whose local name is `Name` (`ss:Name="..."`)
    #[default]
    NameAttribute,
    /// Whatever attribute comes first on the `Worksheet` start tag.
    ///
    /// Matches exports that always put `ss:Name` first. A namespace
    /// declaration or any other attribute in front of it is taken as the
    /// name instead.
    FirstAttribute,
}

/// Options for reading XML spreadsheets
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// How worksheet names are picked
    pub sheet_names: SheetNameSource,
}

impl ReadOptions {
    /// Options that take the first attribute as the sheet name
    pub fn positional_names() -> Self {
        Self {
            sheet_names: SheetNameSource::FirstAttribute,
        }
    }
}
