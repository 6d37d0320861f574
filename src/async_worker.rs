use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use assist_core::radicals::{RadicalSearchResponse, RadicalsResponse};
use assist_core::{FetchError, SuggestionResponse};
use assist_session::{RadicalQuery, RadicalSearchQuery, RequestId, SuggestionQuery};
use tracing::debug;

use crate::backend::Backend;

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

pub(crate) struct SuggestionWork {
    pub query: SuggestionQuery,
    pub generation: u64,
}

pub(crate) struct SuggestionResult {
    pub id: RequestId,
    pub result: Result<SuggestionResponse, FetchError>,
}

pub(crate) struct SearchWork {
    pub query: RadicalSearchQuery,
    pub generation: u64,
}

pub(crate) struct SearchResult {
    pub id: RequestId,
    pub result: Result<RadicalSearchResponse, FetchError>,
}

pub(crate) struct RadicalResult {
    pub query: RadicalQuery,
    pub result: Result<RadicalsResponse, FetchError>,
}

// ---------------------------------------------------------------------------
// AsyncWorker
// ---------------------------------------------------------------------------

/// One background thread per backend endpoint.
pub(crate) struct AsyncWorker {
    suggestion_tx: mpsc::Sender<SuggestionWork>,
    suggestion_rx: Mutex<mpsc::Receiver<SuggestionResult>>,
    suggestion_gen: Arc<AtomicU64>,

    radical_tx: mpsc::Sender<RadicalQuery>,
    radical_rx: Mutex<mpsc::Receiver<RadicalResult>>,

    search_tx: mpsc::Sender<SearchWork>,
    search_rx: Mutex<mpsc::Receiver<SearchResult>>,
    search_gen: Arc<AtomicU64>,
}

impl AsyncWorker {
    pub fn new(backend: Arc<dyn Backend>) -> io::Result<Self> {
        let suggestion_gen = Arc::new(AtomicU64::new(0));
        let search_gen = Arc::new(AtomicU64::new(0));

        // Suggestion worker
        let (work_tx, work_rx) = mpsc::channel::<SuggestionWork>();
        let (result_tx, result_rx) = mpsc::channel::<SuggestionResult>();
        {
            let backend = Arc::clone(&backend);
            let gen = Arc::clone(&suggestion_gen);
            thread::Builder::new()
                .name("assist-suggestions".into())
                .spawn(move || suggestion_worker(work_rx, result_tx, gen, backend))?;
        }

        // Radical worker
        let (radical_work_tx, radical_work_rx) = mpsc::channel::<RadicalQuery>();
        let (radical_result_tx, radical_result_rx) = mpsc::channel::<RadicalResult>();
        {
            let backend = Arc::clone(&backend);
            thread::Builder::new()
                .name("assist-radicals".into())
                .spawn(move || radical_worker(radical_work_rx, radical_result_tx, backend))?;
        }

        // Radical search worker
        let (search_work_tx, search_work_rx) = mpsc::channel::<SearchWork>();
        let (search_result_tx, search_result_rx) = mpsc::channel::<SearchResult>();
        {
            let gen = Arc::clone(&search_gen);
            thread::Builder::new()
                .name("assist-radical-search".into())
                .spawn(move || search_worker(search_work_rx, search_result_tx, gen, backend))?;
        }

        Ok(Self {
            suggestion_tx: work_tx,
            suggestion_rx: Mutex::new(result_rx),
            suggestion_gen,
            radical_tx: radical_work_tx,
            radical_rx: Mutex::new(radical_result_rx),
            search_tx: search_work_tx,
            search_rx: Mutex::new(search_result_rx),
            search_gen,
        })
    }

    pub fn submit_suggestions(&self, query: SuggestionQuery) {
        let gen = self.suggestion_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.suggestion_tx.send(SuggestionWork {
            query,
            generation: gen,
        });
    }

    /// Abort the outstanding suggestion fetch. A blocking call already on
    /// the wire runs to completion but its result is dropped.
    pub fn abort_suggestions(&self) {
        self.suggestion_gen.fetch_add(1, Ordering::SeqCst);
    }

    pub fn submit_radicals(&self, query: RadicalQuery) {
        let _ = self.radical_tx.send(query);
    }

    pub fn submit_radical_search(&self, query: RadicalSearchQuery) {
        let gen = self.search_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.search_tx.send(SearchWork {
            query,
            generation: gen,
        });
    }

    pub fn abort_radical_search(&self) {
        self.search_gen.fetch_add(1, Ordering::SeqCst);
    }

    pub fn try_recv_suggestion(&self) -> Option<SuggestionResult> {
        let rx = self.suggestion_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn try_recv_radicals(&self) -> Option<RadicalResult> {
        let rx = self.radical_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn try_recv_radical_search(&self) -> Option<SearchResult> {
        let rx = self.search_rx.lock().ok()?;
        rx.try_recv().ok()
    }
}

// ---------------------------------------------------------------------------
// Worker threads
// ---------------------------------------------------------------------------

fn suggestion_worker(
    rx: mpsc::Receiver<SuggestionWork>,
    tx: mpsc::Sender<SuggestionResult>,
    gen: Arc<AtomicU64>,
    backend: Arc<dyn Backend>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple work items queued, skip to latest
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        // Check staleness before doing work
        if latest.generation != gen.load(Ordering::SeqCst) {
            debug!(id = ?latest.query.id, "skipping aborted suggestion fetch");
            continue;
        }

        let result = backend.suggest(&latest.query.request);

        // Check staleness after the round trip
        if latest.generation != gen.load(Ordering::SeqCst) {
            debug!(id = ?latest.query.id, "dropping aborted suggestion response");
            continue;
        }

        let _ = tx.send(SuggestionResult {
            id: latest.query.id,
            result,
        });
    }
}

fn search_worker(
    rx: mpsc::Receiver<SearchWork>,
    tx: mpsc::Sender<SearchResult>,
    gen: Arc<AtomicU64>,
    backend: Arc<dyn Backend>,
) {
    while let Ok(work) = rx.recv() {
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if latest.generation != gen.load(Ordering::SeqCst) {
            continue;
        }
        let result = backend.search_radicals(&latest.query.request);
        if latest.generation != gen.load(Ordering::SeqCst) {
            debug!(id = ?latest.query.id, "dropping aborted radical search response");
            continue;
        }

        let _ = tx.send(SearchResult {
            id: latest.query.id,
            result,
        });
    }
}

fn radical_worker(
    rx: mpsc::Receiver<RadicalQuery>,
    tx: mpsc::Sender<RadicalResult>,
    backend: Arc<dyn Backend>,
) {
    while let Ok(query) = rx.recv() {
        // Only the latest selection can still be current
        let mut latest = query;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        let result = backend.kanji_by_radicals(&latest.request());
        let _ = tx.send(RadicalResult {
            query: latest,
            result,
        });
    }
}
