use crate::profile::raw_tree::{RawRecord, RawValue, as_list};

/// Category of a user label in the profile's `<names>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameCategory {
    Button,
    Dpad,
    Stick,
    Axis,
}

impl NameCategory {
    /// Element name holding this category's entries.
    pub fn element(self) -> &'static str {
        match self {
            NameCategory::Button => "buttonname",
            NameCategory::Dpad => "vdpadbutton",
            NameCategory::Stick => "controlstickbuttonname",
            NameCategory::Axis => "axisname",
        }
    }

    /// Composite categories also match on the `button` attribute.
    #[inline]
    fn has_button_index(self) -> bool {
        matches!(self, NameCategory::Dpad | NameCategory::Stick)
    }
}

/// Resolver over an optional `<names>` block. Only used while normalizing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionNames<'a> {
    block: Option<&'a RawRecord>,
}

impl<'a> ActionNames<'a> {
    #[inline]
    pub fn new(block: Option<&'a RawRecord>) -> Self {
        Self { block }
    }

    /// Label for `(category, index, button)`. First matching entry wins; an entry with
    /// empty text yields `None`.
    pub fn resolve(
        &self,
        category: NameCategory,
        index: u32,
        button: Option<u32>,
    ) -> Option<String> {
        let entries = self.block?.field(category.element())?;

        as_list(entries)
            .iter()
            .filter_map(RawValue::as_record)
            .find(|entry| {
                if entry.numeric_attribute("index") != Some(index) {
                    return false;
                }
                if !category.has_button_index() {
                    return true;
                }
                button.is_some() && entry.numeric_attribute("button") == button
            })
            .and_then(RawRecord::text)
            .map(str::to_string)
    }
}
