//! Active/inactive switching within one cluster of tabs.

/// Whether a tab's button and pane are shown as selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Selected; the pane is shown
    Active,
    /// Not selected; the pane is hidden
    Inactive,
}

impl Visibility {
    /// Returns true for `Active`.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// One `(button, pane)` entry of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    /// Target name, also the pane class prefix (`<target>-tab`)
    pub target: &'static str,
    /// Button label
    pub label: &'static str,
    /// Current visibility
    pub visibility: Visibility,
}

impl TabEntry {
    /// Class string of the tab button.
    #[must_use]
    pub fn button_class(&self) -> String {
        match self.visibility {
            Visibility::Active => "tab-btn active".to_string(),
            Visibility::Inactive => "tab-btn".to_string(),
        }
    }

    /// Class string of the tab pane.
    #[must_use]
    pub fn pane_class(&self) -> String {
        match self.visibility {
            Visibility::Active => format!("{}-tab tab-pane active", self.target),
            Visibility::Inactive => format!("{}-tab tab-pane", self.target),
        }
    }
}

/// Outcome of a successful switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSwitch {
    /// The entry now active
    pub target: &'static str,
    /// True if the entry was inactive before the switch
    pub became_visible: bool,
}

/// A labelled cluster of tabs of which at most one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    name: &'static str,
    entries: Vec<TabEntry>,
}

impl TabGroup {
    /// Creates a group from `(target, label)` pairs.
    ///
    /// `active` names the initially active entry; `None` leaves every entry
    /// inactive.
    #[must_use]
    pub fn new(
        name: &'static str,
        entries: &[(&'static str, &'static str)],
        active: Option<&str>,
    ) -> Self {
        let entries = entries
            .iter()
            .map(|&(target, label)| TabEntry {
                target,
                label,
                visibility: if Some(target) == active {
                    Visibility::Active
                } else {
                    Visibility::Inactive
                },
            })
            .collect();
        Self { name, entries }
    }

    /// Returns the group name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Makes `target` the only active entry of this group.
    ///
    /// Unknown targets leave the group unchanged and return `None`.
    pub fn switch_to(&mut self, target: &str) -> Option<TabSwitch> {
        let Some(index) = self.entries.iter().position(|e| e.target == target) else {
            tracing::warn!(group = self.name, target, "Switch to unknown tab ignored");
            return None;
        };

        let became_visible = !self.entries[index].visibility.is_active();
        for entry in &mut self.entries {
            entry.visibility = Visibility::Inactive;
        }
        self.entries[index].visibility = Visibility::Active;

        tracing::debug!(group = self.name, target, "Switched tab");
        Some(TabSwitch {
            target: self.entries[index].target,
            became_visible,
        })
    }

    /// Returns the active entry's target, if any.
    #[must_use]
    pub fn active(&self) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.visibility.is_active())
            .map(|e| e.target)
    }

    /// Returns the visibility of `target`.
    #[must_use]
    pub fn visibility(&self, target: &str) -> Option<Visibility> {
        self.entry(target).map(|e| e.visibility)
    }

    /// Returns the entry for `target`.
    #[must_use]
    pub fn entry(&self, target: &str) -> Option<&TabEntry> {
        self.entries.iter().find(|e| e.target == target)
    }

    /// Returns every entry in display order.
    #[must_use]
    pub fn entries(&self) -> &[TabEntry] {
        &self.entries
    }
}
