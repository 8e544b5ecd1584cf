//! Display abstraction for the rendered clock text.
//!
//! This module defines the [`TextDisplay`] trait for the surface the time is
//! written into, and [`DisplayResolver`] for locating that surface by its
//! identifier (an element id on a page, a named terminal region, etc.).

/// Writable text surface.
///
/// Implementors provide the host-specific write: a DOM element's text
/// content, a terminal line, a character LCD, or a recording mock for tests.
///
/// # Example
///
/// ```ignore
/// use rs_digiclock::traits::TextDisplay;
///
/// struct Lcd { /* ... */ }
///
/// impl TextDisplay for Lcd {
///     type Error = ();
///
///     fn set_text(&mut self, text: &str) -> Result<(), ()> {
///         // Overwrite the first line with `text`
///         Ok(())
///     }
/// }
/// ```
pub trait TextDisplay {
    /// Error type for write operations.
    type Error: core::fmt::Debug;

    /// Overwrites the entire text content of the surface.
    ///
    /// Called on every render. Implementations must replace, not append.
    fn set_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Locates a [`TextDisplay`] by a fixed identifier.
///
/// Resolution happens exactly once, when the clock controller is built.
/// Returning `None` leaves the controller permanently inert.
pub trait DisplayResolver {
    /// The display handle this resolver hands out.
    type Display: TextDisplay;

    /// Looks up the display registered under `id`.
    fn resolve(&mut self, id: &str) -> Option<Self::Display>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Board {
        text: [u8; 8],
        len: usize,
    }

    impl TextDisplay for Board {
        type Error = ();

        fn set_text(&mut self, text: &str) -> Result<(), ()> {
            if text.len() > self.text.len() {
                return Err(());
            }
            self.text[..text.len()].copy_from_slice(text.as_bytes());
            self.len = text.len();
            Ok(())
        }
    }

    struct OneBoard;

    impl DisplayResolver for OneBoard {
        type Display = Board;

        fn resolve(&mut self, id: &str) -> Option<Board> {
            (id == "board").then(|| Board {
                text: [0; 8],
                len: 0,
            })
        }
    }

    #[test]
    fn resolver_matches_exact_id() {
        let mut resolver = OneBoard;
        assert!(resolver.resolve("board").is_some());
        assert!(resolver.resolve("Board").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn set_text_overwrites() {
        let mut board = OneBoard.resolve("board").unwrap();
        board.set_text("12:00:00").unwrap();
        board.set_text("1").unwrap();
        assert_eq!(&board.text[..board.len], b"1");
    }

    #[test]
    fn set_text_reports_errors() {
        let mut board = OneBoard.resolve("board").unwrap();
        assert_eq!(board.set_text("123456789"), Err(()));
    }
}
