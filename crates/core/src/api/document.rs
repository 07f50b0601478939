//! Document-level extraction over a sequence of page sources.

use rayon::prelude::*;
use tracing::debug;

use crate::engine::PageSource;
use crate::error::{ExtractError, Result};
use crate::ids::DocumentId;
use crate::layout::{LayoutParams, PageExtraction};

use super::page::extract_page;

/// Options for document extraction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractOptions {
    /// Zero-indexed page numbers to extract. None means all pages.
    pub page_numbers: Option<Vec<usize>>,

    /// Maximum number of pages to extract. 0 means no limit.
    pub maxpages: usize,

    /// Layout parameters shared by every page.
    pub params: LayoutParams,
}

/// Extracts pages of one document.
///
/// Pages hold no shared state, so [`DocumentExtractor::extract_all_parallel`]
/// gives the same results as collecting [`DocumentExtractor::pages`].
pub struct DocumentExtractor<'a, S> {
    sources: &'a [S],
    doc: DocumentId,
    options: ExtractOptions,
}

impl<'a, S: PageSource> DocumentExtractor<'a, S> {
    pub fn new(sources: &'a [S], doc: DocumentId, options: ExtractOptions) -> Self {
        Self {
            sources,
            doc,
            options,
        }
    }

    pub fn doc_id(&self) -> &DocumentId {
        &self.doc
    }

    pub fn page_count(&self) -> usize {
        self.sources.len()
    }

    /// Selected 0-based page indices in ascending order.
    ///
    /// Fails when a requested page does not exist.
    pub fn page_order(&self) -> Result<Vec<usize>> {
        let count = self.sources.len();
        let mut order: Vec<usize> = match &self.options.page_numbers {
            Some(nums) => {
                if let Some(&bad) = nums.iter().find(|&&n| n >= count) {
                    return Err(ExtractError::PageOutOfRange {
                        page: bad + 1,
                        count,
                    });
                }
                let mut nums = nums.clone();
                nums.sort_unstable();
                nums.dedup();
                nums
            }
            None => (0..count).collect(),
        };
        if self.options.maxpages > 0 {
            order.truncate(self.options.maxpages);
        }
        Ok(order)
    }

    /// Extracts one page by 0-based index.
    pub fn extract(&self, page_index: usize) -> Result<PageExtraction> {
        let source = self
            .sources
            .get(page_index)
            .ok_or(ExtractError::PageOutOfRange {
                page: page_index + 1,
                count: self.sources.len(),
            })?;
        extract_page(source, &self.doc, page_index, &self.options.params)
    }

    /// Streams the selected pages one at a time in ascending order.
    pub fn pages(&self) -> Result<PageIterator<'_, 'a, S>> {
        Ok(PageIterator {
            extractor: self,
            order: self.page_order()?.into_iter(),
        })
    }
}

impl<S: PageSource + Sync> DocumentExtractor<'_, S> {
    /// Extracts the selected pages on the rayon pool.
    ///
    /// Results come back in page order; the first failing page (in page
    /// order) is returned as the error.
    pub fn extract_all_parallel(&self) -> Result<Vec<PageExtraction>> {
        let order = self.page_order()?;
        debug!(pages = order.len(), "parallel extraction");
        order
            .into_par_iter()
            .map(|page_index| self.extract(page_index))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }
}

/// Sequential page iterator returned by [`DocumentExtractor::pages`].
pub struct PageIterator<'e, 'a, S> {
    extractor: &'e DocumentExtractor<'a, S>,
    order: std::vec::IntoIter<usize>,
}

impl<S: PageSource> Iterator for PageIterator<'_, '_, S> {
    type Item = Result<PageExtraction>;

    fn next(&mut self) -> Option<Self::Item> {
        let page_index = self.order.next()?;
        Some(self.extractor.extract(page_index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}
