//! Host visibility signal.

/// Whether the hosting surface is currently visible to the user.
///
/// # Default
///
/// Defaults to [`Visible`](Self::Visible): a freshly started host is assumed
/// to be on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Visibility {
    /// On screen.
    #[default]
    Visible,
    /// Backgrounded, minimized, or otherwise off screen.
    Hidden,
}

impl Visibility {
    /// Returns the visibility as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_digiclock::Visibility;
    ///
    /// assert_eq!(Visibility::Visible.as_str(), "visible");
    /// assert_eq!(Visibility::Hidden.as_str(), "hidden");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }

    /// Returns true for [`Visible`](Self::Visible).
    #[inline]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }

    /// Parse visibility from text input.
    ///
    /// Accepts `"visible"`/`"show"`/`"1"` and `"hidden"`/`"hide"`/`"0"`.
    /// Input is trimmed and case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_digiclock::Visibility;
    ///
    /// assert_eq!(Visibility::from_text("show"), Some(Visibility::Visible));
    /// assert_eq!(Visibility::from_text(" HIDDEN "), Some(Visibility::Hidden));
    /// assert_eq!(Visibility::from_text("dim"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        if ["visible", "show", "1"]
            .iter()
            .any(|name| s.eq_ignore_ascii_case(name))
        {
            Some(Visibility::Visible)
        } else if ["hidden", "hide", "0"]
            .iter()
            .any(|name| s.eq_ignore_ascii_case(name))
        {
            Some(Visibility::Hidden)
        } else {
            None
        }
    }
}
