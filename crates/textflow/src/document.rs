//! Multi-page driver over a [`PageSource`].

use textflow_core::{ExtractOptions, TextflowError};
use tracing::debug;

use crate::page::PageThread;
use crate::source::PageSource;

/// Iterator over the pages of a [`Document`], building each page on demand.
///
/// Created by [`Document::pages()`]. Pages are not retained after being
/// yielded; the caller owns each `PageThread`.
pub struct PagesIter<'a, S: PageSource> {
    doc: &'a Document<S>,
    current: usize,
    count: usize,
}

impl<S: PageSource> Iterator for PagesIter<'_, S> {
    type Item = Result<PageThread, TextflowError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.count {
            return None;
        }
        let result = self.doc.page(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.current;
        (remaining, Some(remaining))
    }
}

impl<S: PageSource> ExactSizeIterator for PagesIter<'_, S> {}

/// A document whose pages come from a [`PageSource`].
///
/// # Example
///
/// ```
/// use textflow::{Document, MemorySource, PageInput};
///
/// let doc = Document::open(MemorySource::new(vec![PageInput::default()]))?;
/// assert_eq!(doc.page_count(), 1);
/// assert_eq!(doc.page(0)?.text(), "");
/// # Ok::<(), textflow::TextflowError>(())
/// ```
pub struct Document<S: PageSource> {
    source: S,
    options: ExtractOptions,
}

impl<S: PageSource> Document<S> {
    /// Wrap `source` with default options.
    pub fn open(source: S) -> Result<Self, TextflowError> {
        Self::with_options(source, ExtractOptions::default())
    }

    /// Wrap `source` with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`TextflowError::InvalidOption`] if the options do not validate.
    pub fn with_options(source: S, options: ExtractOptions) -> Result<Self, TextflowError> {
        options.validate()?;
        debug!(pages = source.page_count(), "document opened");
        Ok(Self { source, options })
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn page_count(&self) -> usize {
        self.source.page_count()
    }

    /// Build the page at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`TextflowError::PageOutOfRange`] for an index past the end, or
    /// [`TextflowError::Source`] if the source fails to supply the page.
    pub fn page(&self, index: usize) -> Result<PageThread, TextflowError> {
        let count = self.page_count();
        if index >= count {
            return Err(TextflowError::PageOutOfRange { index, count });
        }
        let input = self.source.page_input(index)?;
        Ok(PageThread::build(index, input, &self.options))
    }

    /// Iterate over all pages in order.
    pub fn pages(&self) -> PagesIter<'_, S> {
        PagesIter {
            doc: self,
            current: 0,
            count: self.page_count(),
        }
    }

    /// Build all pages in parallel using rayon.
    ///
    /// Results are returned in page order. Each page owns its own elements
    /// and marked-content map.
    #[cfg(feature = "parallel")]
    pub fn pages_parallel(&self) -> Vec<Result<PageThread, TextflowError>>
    where
        S: Sync,
    {
        use rayon::prelude::*;

        (0..self.page_count())
            .into_par_iter()
            .map(|i| self.page(i))
            .collect()
    }
}
