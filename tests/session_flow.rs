use reelscout::domain::{ImageConfig, Movie, MoviePage, ReelscoutError, Result};
use reelscout::remote::MovieApi;
use reelscout::session::{HostSignal, Session};
use reelscout::ui::{Body, Renderer, ViewModel};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Scripted API: every response and its latency is decided by the test.
#[derive(Clone, Default)]
struct ScriptedApi {
    calls: Rc<RefCell<Vec<String>>>,
    config_fails: bool,
}

impl ScriptedApi {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn page(ids: &[u64]) -> MoviePage {
        MoviePage {
            page: 1,
            results: ids
                .iter()
                .map(|&id| {
                    let mut movie = Movie::new(id, format!("movie {id}"));
                    movie.poster_path = Some(format!("/{id}.jpg"));
                    movie
                })
                .collect(),
            total_pages: 5,
            total_results: 100,
        }
    }
}

impl MovieApi for ScriptedApi {
    async fn trending(&self, page: u32) -> Result<MoviePage> {
        self.calls.borrow_mut().push(format!("trending:{page}"));
        sleep(Duration::from_millis(100)).await;
        Ok(Self::page(&[u64::from(page) * 100, u64::from(page) * 100 + 1]))
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage> {
        self.calls.borrow_mut().push(format!("search:{query}:{page}"));
        match (query, page) {
            ("batman", 1) => {
                sleep(Duration::from_millis(10)).await;
                Ok(Self::page(&[10, 11]))
            }
            ("batman", 2) => {
                sleep(Duration::from_millis(1000)).await;
                Ok(Self::page(&[12, 13]))
            }
            ("superman", 1) => {
                sleep(Duration::from_millis(10)).await;
                Ok(Self::page(&[20, 21]))
            }
            ("broken", _) => Err(ReelscoutError::Http {
                status: 500,
                endpoint: "/search/movie".to_string(),
            }),
            _ => {
                sleep(Duration::from_millis(10)).await;
                Ok(MoviePage::default())
            }
        }
    }

    async fn movie(&self, id: u64) -> Result<Movie> {
        self.calls.borrow_mut().push(format!("movie:{id}"));
        let mut movie = Movie::new(id, "Heat");
        movie.backdrop_path = Some("/heat.jpg".to_string());
        Ok(movie)
    }

    async fn image_config(&self) -> Result<ImageConfig> {
        self.calls.borrow_mut().push("configuration".to_string());
        sleep(Duration::from_millis(5)).await;
        if self.config_fails {
            return Err(ReelscoutError::Http {
                status: 401,
                endpoint: "/configuration".to_string(),
            });
        }
        Ok(ImageConfig {
            base_url: "https://img/t/p/".to_string(),
            poster_sizes: vec!["w92".into(), "w342".into(), "original".into()],
            backdrop_sizes: vec!["w780".into(), "original".into()],
        })
    }
}

#[derive(Clone, Default)]
struct RecordingRenderer {
    frames: Rc<RefCell<Vec<ViewModel>>>,
}

impl RecordingRenderer {
    fn last(&self) -> ViewModel {
        self.frames.borrow().last().cloned().expect("at least one frame")
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &ViewModel) -> std::io::Result<()> {
        self.frames.borrow_mut().push(view.clone());
        Ok(())
    }
}

fn result_ids(state: &reelscout::AppState) -> Vec<u64> {
    state.results.iter().map(|m| m.id).collect()
}

#[tokio::test(start_paused = true)]
async fn late_response_for_old_term_is_discarded() {
    let api = ScriptedApi::default();
    let renderer = RecordingRenderer::default();
    let session = Session::new(api.clone(), renderer.clone(), DEBOUNCE);
    let (tx, rx) = mpsc::channel(16);

    let script = async move {
        tx.send(HostSignal::Input("batman".into())).await.unwrap();
        sleep(Duration::from_millis(600)).await;
        tx.send(HostSignal::ScrollNear).await.unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send(HostSignal::Input("superman".into())).await.unwrap();
        sleep(Duration::from_millis(1300)).await;
        tx.send(HostSignal::Shutdown).await.unwrap();
    };

    let (state, ()) = tokio::join!(session.run(rx), script);
    let state = state.unwrap();

    assert!(api.calls().contains(&"search:batman:2".to_string()));
    assert_eq!(state.term, "superman");
    assert_eq!(state.page, 1);
    assert_eq!(result_ids(&state), vec![20, 21]);
    assert!(!state.is_loading());

    let Body::List(list) = renderer.last().body else {
        panic!("expected list frame");
    };
    let ids: Vec<u64> = list.items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![20, 21]);
}

#[tokio::test(start_paused = true)]
async fn typing_burst_searches_once_for_last_value() {
    let api = ScriptedApi::default();
    let session = Session::new(api.clone(), RecordingRenderer::default(), DEBOUNCE);
    let (tx, rx) = mpsc::channel(16);

    let script = async move {
        for text in ["a", "av", "ave"] {
            tx.send(HostSignal::Input(text.into())).await.unwrap();
            sleep(Duration::from_millis(100)).await;
        }
        sleep(Duration::from_millis(1000)).await;
        tx.send(HostSignal::Shutdown).await.unwrap();
    };

    let (state, ()) = tokio::join!(session.run(rx), script);
    let searches: Vec<String> = api
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("search:"))
        .collect();

    assert_eq!(searches, vec!["search:ave:1".to_string()]);
    assert_eq!(state.unwrap().term, "ave");
}

#[tokio::test(start_paused = true)]
async fn scroll_signals_during_load_are_not_queued() {
    let api = ScriptedApi::default();
    let session = Session::new(api.clone(), RecordingRenderer::default(), DEBOUNCE);
    let (tx, rx) = mpsc::channel(16);

    let script = async move {
        for _ in 0..3 {
            sleep(Duration::from_millis(10)).await;
            tx.send(HostSignal::ScrollNear).await.unwrap();
        }
        sleep(Duration::from_millis(200)).await;
        tx.send(HostSignal::ScrollNear).await.unwrap();
        sleep(Duration::from_millis(200)).await;
        tx.send(HostSignal::Shutdown).await.unwrap();
    };

    let (state, ()) = tokio::join!(session.run(rx), script);
    let state = state.unwrap();
    let trending: Vec<String> = api
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("trending:"))
        .collect();

    assert_eq!(trending, vec!["trending:1".to_string(), "trending:2".to_string()]);
    assert_eq!(state.page, 2);
    assert_eq!(result_ids(&state), vec![100, 101, 200, 201]);
}

#[tokio::test(start_paused = true)]
async fn configuration_is_fetched_once_and_feeds_poster_urls() {
    let api = ScriptedApi::default();
    let renderer = RecordingRenderer::default();
    let session = Session::new(api.clone(), renderer.clone(), DEBOUNCE);
    let (tx, rx) = mpsc::channel(16);

    let script = async move {
        sleep(Duration::from_millis(300)).await;
        tx.send(HostSignal::ScrollNear).await.unwrap();
        sleep(Duration::from_millis(300)).await;
        tx.send(HostSignal::Shutdown).await.unwrap();
    };

    let (state, ()) = tokio::join!(session.run(rx), script);
    state.unwrap();

    let config_calls = api.calls().iter().filter(|c| *c == "configuration").count();
    assert_eq!(config_calls, 1);

    let Body::List(list) = renderer.last().body else {
        panic!("expected list frame");
    };
    assert_eq!(
        list.items[0].poster_url.as_deref(),
        Some("https://img/t/p/w342/100.jpg")
    );
    assert_eq!(list.items[0].poster_candidates[0].width, 92);
}

#[tokio::test(start_paused = true)]
async fn failed_configuration_degrades_to_no_images() {
    let api = ScriptedApi {
        config_fails: true,
        ..ScriptedApi::default()
    };
    let renderer = RecordingRenderer::default();
    let session = Session::new(api.clone(), renderer.clone(), DEBOUNCE);
    let (tx, rx) = mpsc::channel(16);

    let script = async move {
        sleep(Duration::from_millis(300)).await;
        tx.send(HostSignal::Shutdown).await.unwrap();
    };

    let (state, ()) = tokio::join!(session.run(rx), script);
    assert_eq!(result_ids(&state.unwrap()), vec![100, 101]);

    let frame = renderer.last();
    assert_eq!(frame.notice.as_deref(), Some("Images unavailable"));
    let Body::List(list) = frame.body else {
        panic!("expected list frame");
    };
    assert!(list.items.iter().all(|item| item.poster_url.is_none()));
}

#[tokio::test(start_paused = true)]
async fn failed_search_keeps_previous_results() {
    let api = ScriptedApi::default();
    let renderer = RecordingRenderer::default();
    let session = Session::new(api.clone(), renderer.clone(), DEBOUNCE);
    let (tx, rx) = mpsc::channel(16);

    let script = async move {
        sleep(Duration::from_millis(200)).await;
        tx.send(HostSignal::Input("broken".into())).await.unwrap();
        sleep(Duration::from_millis(700)).await;
        tx.send(HostSignal::Shutdown).await.unwrap();
    };

    let (state, ()) = tokio::join!(session.run(rx), script);
    let state = state.unwrap();

    assert_eq!(result_ids(&state), vec![100, 101]);
    assert!(!state.is_loading());
    assert!(renderer
        .last()
        .notice
        .is_some_and(|notice| notice.contains("HTTP 500")));
}

#[tokio::test(start_paused = true)]
async fn detail_screen_round_trip() {
    let api = ScriptedApi::default();
    let renderer = RecordingRenderer::default();
    let session = Session::new(api.clone(), renderer.clone(), DEBOUNCE);
    let (tx, rx) = mpsc::channel(16);

    let frames = Rc::clone(&renderer.frames);
    let script = async move {
        sleep(Duration::from_millis(200)).await;
        tx.send(HostSignal::Open(949)).await.unwrap();
        sleep(Duration::from_millis(50)).await;
        let detail = frames.borrow().last().cloned().expect("detail frame");
        tx.send(HostSignal::Back).await.unwrap();
        sleep(Duration::from_millis(50)).await;
        tx.send(HostSignal::Shutdown).await.unwrap();
        detail
    };

    let (state, detail) = tokio::join!(session.run(rx), script);
    state.unwrap();

    let Body::Detail(detail) = detail.body else {
        panic!("expected detail frame");
    };
    assert_eq!(detail.title.as_deref(), Some("Heat"));
    assert_eq!(detail.backdrop_url.as_deref(), Some("https://img/t/p/w780/heat.jpg"));
    assert!(matches!(renderer.last().body, Body::List(_)));
}
