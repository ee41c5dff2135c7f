//! # Blocking Projections
//!
//! The runtime pipeline is written once, in cooperative-concurrency style;
//! the blocking surface is a thin projection that drives the same futures to
//! completion on a dedicated current-thread runtime owned by the blocking
//! facade. Suspension points become blocking waits; nothing else changes.

use crate::error::Error;
use crate::lro::{OperationFuture, OperationState};
use crate::pager::{PageRequest, PageResponse, Pager};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Blocking view over a [`Pager`].
pub struct BlockingPager<Req: PageRequest, Res: PageResponse> {
    inner: Pager<Req, Res>,
    runtime: Arc<Runtime>,
}

impl<Req: PageRequest, Res: PageResponse> BlockingPager<Req, Res> {
    pub fn new(inner: Pager<Req, Res>, runtime: Arc<Runtime>) -> Self {
        Self { inner, runtime }
    }

    pub fn latest_page(&self) -> &Res {
        self.inner.latest_page()
    }

    pub fn next_page(&mut self) -> Result<Option<Res>, Error> {
        self.runtime.block_on(self.inner.next_page())
    }

    /// Iterator over raw pages, starting from the currently held response.
    pub fn pages(&mut self) -> BlockingPages<'_, Req, Res> {
        self.inner.rewind();
        BlockingPages { pager: self }
    }

    /// Iterator over items, flattened across pages in server order.
    pub fn items(&mut self) -> BlockingItems<'_, Req, Res> {
        self.inner.rewind();
        BlockingItems {
            pager: self,
            buffer: VecDeque::new(),
            finished: false,
        }
    }
}

impl<Req: PageRequest, Res: PageResponse> std::fmt::Debug for BlockingPager<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingPager").finish_non_exhaustive()
    }
}

pub struct BlockingPages<'a, Req: PageRequest, Res: PageResponse> {
    pager: &'a mut BlockingPager<Req, Res>,
}

impl<Req: PageRequest, Res: PageResponse> Iterator for BlockingPages<'_, Req, Res> {
    type Item = Result<Res, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pager
            .runtime
            .clone()
            .block_on(self.pager.inner.next_page())
            .transpose()
    }
}

pub struct BlockingItems<'a, Req: PageRequest, Res: PageResponse> {
    pager: &'a mut BlockingPager<Req, Res>,
    buffer: VecDeque<Res::Item>,
    finished: bool,
}

impl<Req: PageRequest, Res: PageResponse> Iterator for BlockingItems<'_, Req, Res> {
    type Item = Result<Res::Item, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            let runtime = self.pager.runtime.clone();
            match runtime.block_on(self.pager.inner.next_page()) {
                Ok(Some(page)) => self.buffer.extend(page.into_items()),
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

/// Blocking view over an [`OperationFuture`].
pub struct BlockingOperationFuture<Op: OperationState, R, M> {
    inner: OperationFuture<Op, R, M>,
    runtime: Arc<Runtime>,
}

impl<Op, R, M> BlockingOperationFuture<Op, R, M>
where
    Op: OperationState,
    R: prost::Message + prost::Name + Default,
    M: prost::Message + prost::Name + Default,
{
    pub fn new(inner: OperationFuture<Op, R, M>, runtime: Arc<Runtime>) -> Self {
        Self { inner, runtime }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn done(&self) -> bool {
        self.inner.done()
    }

    pub fn metadata(&self) -> Result<Option<M>, Error> {
        self.inner.metadata()
    }

    pub fn refresh(&mut self) -> Result<&Op, Error> {
        let runtime = self.runtime.clone();
        runtime.block_on(self.inner.refresh())
    }

    pub fn cancel(&mut self) -> Result<(), Error> {
        let runtime = self.runtime.clone();
        runtime.block_on(self.inner.cancel())
    }

    /// Blocks until terminal or `timeout` elapses.
    pub fn result(self, timeout: Option<Duration>) -> Result<R, Error> {
        self.runtime.block_on(self.inner.result(timeout))
    }
}

impl<Op, R, M> std::fmt::Debug for BlockingOperationFuture<Op, R, M>
where
    Op: OperationState,
    R: prost::Message + prost::Name + Default,
    M: prost::Message + prost::Name + Default,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingOperationFuture")
            .field("name", &self.inner.name())
            .field("done", &self.inner.done())
            .finish()
    }
}
