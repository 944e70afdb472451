//! Stream adapters shared by the countdown and the gate counter.

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream wrapper that runs a hook exactly once when the stream ends.
///
/// The hook fires when the inner stream yields `None`, or when the wrapper is
/// dropped before that (the consumer stopped pulling early).
pub struct OnCompletion<S, F: FnOnce()> {
    inner: S,
    hook: Option<F>,
}

impl<S, F: FnOnce()> OnCompletion<S, F> {
    pub fn new(inner: S, hook: F) -> Self {
        Self {
            inner,
            hook: Some(hook),
        }
    }

    fn complete(&mut self) {
        if let Some(hook) = self.hook.take() {
            hook();
        }
    }
}

impl<S, F> Stream for OnCompletion<S, F>
where
    S: Stream + Unpin,
    F: FnOnce() + Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(None) => {
                this.complete();
                Poll::Ready(None)
            }
            other => other,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S, F: FnOnce()> Drop for OnCompletion<S, F> {
    fn drop(&mut self) {
        self.complete();
    }
}

/// Extension trait adding [`OnCompletion`] to any stream.
pub trait CompletionExt: Stream + Sized {
    fn on_completion<F: FnOnce()>(self, hook: F) -> OnCompletion<Self, F> {
        OnCompletion::new(self, hook)
    }
}

impl<S: Stream> CompletionExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Unpin) {
        let calls = Arc::new(AtomicUsize::new(0));
        let hook_calls = Arc::clone(&calls);
        (calls, move || {
            hook_calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn test_hook_runs_once_on_exhaustion() {
        let (calls, hook) = counter();
        let mut stream = futures::stream::iter(vec![1, 2, 3]).on_completion(hook);

        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            assert_eq!(calls.load(Ordering::SeqCst), 0);
            items.push(item);
        }
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Polling again and dropping must not fire the hook a second time.
        assert!(stream.next().await.is_none());
        drop(stream);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hook_runs_on_early_drop() {
        let (calls, hook) = counter();
        let mut stream = futures::stream::iter(vec![1, 2, 3]).on_completion(hook);

        assert_eq!(stream.next().await, Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        drop(stream);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pending_stream_keeps_hook() {
        let (calls, hook) = counter();
        let mut stream =
            tokio_test::task::spawn(futures::stream::pending::<i32>().on_completion(hook));

        tokio_test::assert_pending!(stream.poll_next());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        drop(stream);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hook_runs_for_empty_stream() {
        let (calls, hook) = counter();
        let items: Vec<i32> = futures::stream::empty::<i32>().on_completion(hook).collect().await;
        assert!(items.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
