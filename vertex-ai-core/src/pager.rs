//! # Pagination Engine
//!
//! List RPCs return one server-side page at a time; a [`Pager`] turns the
//! wrapped method plus the first response into a lazy, flat sequence of
//! items that transparently fetches successive pages.
//!
//! ## Page loop
//!
//! The initial response is the first page. While the current page carries a
//! non-empty `next_page_token`, the token is written into the request's
//! `page_token` and the wrapped method is invoked again with the stored
//! metadata. An empty token is the sole terminator; the pager never re-sends
//! the same token for the same response — any retrying is the method
//! wrapper's job.
//!
//! Only the most recent page is retained. Iterating again re-uses the
//! currently held response as the starting point; consumers that need random
//! access materialize the items themselves.

use crate::error::Error;
use crate::options::Metadata;
use futures_util::TryStreamExt;
use futures_util::future::BoxFuture;
use futures_util::stream::{self, Stream};
use std::collections::VecDeque;

/// A list request: mutable `page_token`, everything else opaque.
pub trait PageRequest: Clone + Send + 'static {
    fn set_page_token(&mut self, token: String);
}

/// A list response: a `next_page_token` and one statically-known repeated
/// field of items.
pub trait PageResponse: Clone + Send + 'static {
    type Item: Send + 'static;

    fn next_page_token(&self) -> &str;
    fn into_items(self) -> Vec<Self::Item>;
}

/// The wrapped method a pager re-invokes for follow-up pages.
pub type PageFetcher<Req, Res> =
    Box<dyn FnMut(Req, Metadata) -> BoxFuture<'static, Result<Res, Error>> + Send>;

/// Lazy iterator over the pages and items of a list RPC.
pub struct Pager<Req: PageRequest, Res: PageResponse> {
    fetch: PageFetcher<Req, Res>,
    request: Req,
    latest: Res,
    metadata: Metadata,
    yielded_current: bool,
}

impl<Req: PageRequest, Res: PageResponse> Pager<Req, Res> {
    pub fn new(fetch: PageFetcher<Req, Res>, request: Req, first_page: Res, metadata: Metadata) -> Self {
        Self {
            fetch,
            request,
            latest: first_page,
            metadata,
            yielded_current: false,
        }
    }

    /// The most recently retrieved response, e.g. to inspect its raw
    /// `next_page_token`.
    pub fn latest_page(&self) -> &Res {
        &self.latest
    }

    pub(crate) fn rewind(&mut self) {
        self.yielded_current = false;
    }

    /// Advances by one page. The first call yields the currently held
    /// response; later calls fetch. `None` once the token is empty.
    pub async fn next_page(&mut self) -> Result<Option<Res>, Error> {
        if !self.yielded_current {
            self.yielded_current = true;
            return Ok(Some(self.latest.clone()));
        }

        let token = self.latest.next_page_token();
        if token.is_empty() {
            return Ok(None);
        }

        self.request.set_page_token(token.to_string());
        tracing::trace!("fetching next page");
        let page = (self.fetch)(self.request.clone(), self.metadata.clone()).await?;
        self.latest = page.clone();
        Ok(Some(page))
    }

    /// Stream of raw pages, starting from the currently held response.
    pub fn pages(&mut self) -> impl Stream<Item = Result<Res, Error>> + Send + '_ {
        self.rewind();
        stream::try_unfold(self, |pager| async move {
            Ok(pager.next_page().await?.map(|page| (page, pager)))
        })
    }

    /// Stream of items, flattened across pages in server order.
    pub fn items(&mut self) -> impl Stream<Item = Result<Res::Item, Error>> + Send + '_ {
        self.rewind();
        stream::try_unfold((self, VecDeque::new()), |(pager, mut buffer)| async move {
            loop {
                if let Some(item) = buffer.pop_front() {
                    return Ok(Some((item, (pager, buffer))));
                }
                match pager.next_page().await? {
                    Some(page) => buffer.extend(page.into_items()),
                    None => return Ok(None),
                }
            }
        })
    }

    /// Collects every remaining item.
    pub async fn all_items(&mut self) -> Result<Vec<Res::Item>, Error> {
        self.items().try_collect().await
    }
}

impl<Req: PageRequest, Res: PageResponse> std::fmt::Debug for Pager<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("yielded_current", &self.yielded_current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct ListRequest {
        page_token: String,
    }

    impl PageRequest for ListRequest {
        fn set_page_token(&mut self, token: String) {
            self.page_token = token;
        }
    }

    #[derive(Debug, Clone, Default)]
    struct ListResponse {
        items: Vec<u32>,
        next_page_token: String,
    }

    impl PageResponse for ListResponse {
        type Item = u32;

        fn next_page_token(&self) -> &str {
            &self.next_page_token
        }

        fn into_items(self) -> Vec<u32> {
            self.items
        }
    }

    fn page(items: &[u32], token: &str) -> ListResponse {
        ListResponse {
            items: items.to_vec(),
            next_page_token: token.to_string(),
        }
    }

    /// Serves the queued pages by token; records the tokens requested.
    fn fetcher(
        pages: Vec<(&'static str, ListResponse)>,
        seen_tokens: Arc<Mutex<Vec<String>>>,
    ) -> PageFetcher<ListRequest, ListResponse> {
        Box::new(move |request, _metadata| {
            let pages = pages.clone();
            let seen_tokens = Arc::clone(&seen_tokens);
            Box::pin(async move {
                seen_tokens.lock().unwrap().push(request.page_token.clone());
                pages
                    .into_iter()
                    .find(|(token, _)| *token == request.page_token)
                    .map(|(_, page)| page)
                    .ok_or_else(|| Error::Permanent {
                        code: 5,
                        message: format!("no page for token '{}'", request.page_token),
                    })
            })
        })
    }

    #[tokio::test]
    async fn items_flatten_pages_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut pager = Pager::new(
            fetcher(
                vec![("t1", page(&[3], "t2")), ("t2", page(&[4, 5], ""))],
                Arc::clone(&seen),
            ),
            ListRequest::default(),
            page(&[1, 2], "t1"),
            Metadata::new(),
        );

        let items = pager.all_items().await.unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        // Exactly two follow-up calls, carrying the server tokens in order.
        assert_eq!(*seen.lock().unwrap(), vec!["t1", "t2"]);
    }

    #[tokio::test]
    async fn empty_first_token_makes_no_calls() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut pager = Pager::new(
            fetcher(vec![], Arc::clone(&seen)),
            ListRequest::default(),
            page(&[7, 8], ""),
            Metadata::new(),
        );

        let items = pager.all_items().await.unwrap();
        assert_eq!(items, vec![7, 8]);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn pages_and_items_agree() {
        let pages_fixture = vec![("t1", page(&[10, 11], ""))];
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut pager = Pager::new(
            fetcher(pages_fixture.clone(), Arc::clone(&seen)),
            ListRequest::default(),
            page(&[9], "t1"),
            Metadata::new(),
        );
        let from_pages: Vec<u32> = pager
            .pages()
            .try_collect::<Vec<_>>()
            .await
            .unwrap()
            .into_iter()
            .flat_map(|p| p.into_items())
            .collect();

        let mut pager = Pager::new(
            fetcher(pages_fixture, Arc::clone(&seen)),
            ListRequest::default(),
            page(&[9], "t1"),
            Metadata::new(),
        );
        let from_items = pager.all_items().await.unwrap();

        assert_eq!(from_pages, from_items);
    }

    #[tokio::test]
    async fn iterating_again_restarts_from_the_held_response() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut pager = Pager::new(
            fetcher(vec![("t1", page(&[2], ""))], Arc::clone(&seen)),
            ListRequest::default(),
            page(&[1], "t1"),
            Metadata::new(),
        );

        assert_eq!(pager.all_items().await.unwrap(), vec![1, 2]);
        // The held response is now the final page; a second pass yields its
        // items without further calls.
        assert_eq!(pager.all_items().await.unwrap(), vec![2]);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mid_iteration_errors_surface_on_next() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut pager = Pager::new(
            fetcher(vec![], Arc::clone(&seen)),
            ListRequest::default(),
            page(&[1], "missing"),
            Metadata::new(),
        );

        assert_eq!(pager.next_page().await.unwrap().unwrap().items, vec![1]);
        let err = pager.next_page().await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn latest_page_exposes_the_raw_response() {
        let mut pager = Pager::new(
            fetcher(vec![("t1", page(&[2], ""))], Arc::new(Mutex::new(Vec::new()))),
            ListRequest::default(),
            page(&[1], "t1"),
            Metadata::new(),
        );

        assert_eq!(pager.latest_page().next_page_token, "t1");
        pager.all_items().await.unwrap();
        assert_eq!(pager.latest_page().next_page_token, "");
    }
}
