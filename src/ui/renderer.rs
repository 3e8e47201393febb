//! Rendering of view models.
//!
//! [`Renderer`] is the presentation seam: the session loop hands it a fresh
//! [`ViewModel`] whenever a transition asks for a redraw. [`TerminalRenderer`]
//! prints plain text to any writer.
//!
//! Choosing among responsive image candidates is a rendering decision, so it
//! lives here in [`select_candidate`] rather than in the resolver.

use crate::domain::ImageCandidate;
use crate::ui::viewmodel::{Body, DetailViewModel, ListViewModel, ViewModel};
use std::io::{self, Write};

/// Receives every frame the session produces.
pub trait Renderer {
    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn render(&mut self, view: &ViewModel) -> io::Result<()>;
}

/// Picks the smallest candidate at least `min_width` wide, or the widest one.
///
/// # Example
///
/// ```rust
/// use reelscout::domain::ImageCandidate;
/// use reelscout::ui::select_candidate;
///
/// let candidates = vec![
///     ImageCandidate { url: "a/w92".into(), width: 92 },
///     ImageCandidate { url: "a/w342".into(), width: 342 },
/// ];
/// assert_eq!(select_candidate(&candidates, 100).unwrap().width, 342);
/// assert_eq!(select_candidate(&candidates, 900).unwrap().width, 342);
/// ```
#[must_use]
pub fn select_candidate(candidates: &[ImageCandidate], min_width: u32) -> Option<&ImageCandidate> {
    candidates
        .iter()
        .filter(|c| c.width >= min_width)
        .min_by_key(|c| c.width)
        .or_else(|| candidates.iter().max_by_key(|c| c.width))
}

/// Plain-text renderer for terminals and logs.
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
    /// When set, each row shows the poster URL best suited to this width.
    poster_width: Option<u32>,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer writing to standard output.
    #[must_use]
    pub fn stdout(poster_width: Option<u32>) -> Self {
        Self::new(io::stdout(), poster_width)
    }
}

impl<W: Write> TerminalRenderer<W> {
    #[must_use]
    pub const fn new(out: W, poster_width: Option<u32>) -> Self {
        Self { out, poster_width }
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_list(&mut self, list: &ListViewModel) -> io::Result<()> {
        if let Some(empty) = &list.empty_state {
            writeln!(self.out, "  {}", empty.message)?;
            writeln!(self.out, "  {}", empty.subtitle)?;
            return Ok(());
        }

        for item in &list.items {
            let year = item.year.map_or_else(String::new, |y| format!(" ({y})"));
            writeln!(self.out, "  [{:>8}] {}{year}", item.id, item.title)?;

            if let Some(width) = self.poster_width {
                let url = select_candidate(&item.poster_candidates, width)
                    .map(|c| c.url.as_str())
                    .or(item.poster_url.as_deref());
                if let Some(url) = url {
                    writeln!(self.out, "             {url}")?;
                }
            }
        }

        if list.loading {
            writeln!(self.out, "  loading...")?;
        }
        Ok(())
    }

    fn render_detail(&mut self, detail: &DetailViewModel) -> io::Result<()> {
        if detail.loading {
            writeln!(self.out, "  loading movie {}...", detail.id)?;
            return Ok(());
        }
        if let Some(error) = &detail.error {
            writeln!(self.out, "  could not load movie {}: {error}", detail.id)?;
            return Ok(());
        }

        let title = detail.title.as_deref().unwrap_or("Untitled");
        let year = detail.year.map_or_else(String::new, |y| format!(" ({y})"));
        writeln!(self.out, "  {title}{year}")?;
        if let Some(rating) = &detail.rating {
            writeln!(self.out, "  rating: {rating}")?;
        }
        if let Some(overview) = &detail.overview {
            writeln!(self.out)?;
            writeln!(self.out, "  {overview}")?;
        }
        if let Some(poster) = &detail.poster_url {
            writeln!(self.out, "  poster:   {poster}")?;
        }
        if let Some(backdrop) = &detail.backdrop_url {
            writeln!(self.out, "  backdrop: {backdrop}")?;
        }
        if !detail.backdrop_candidates.is_empty() {
            let widths: Vec<String> = detail
                .backdrop_candidates
                .iter()
                .map(|c| format!("{}px", c.width))
                .collect();
            writeln!(self.out, "  backdrop sizes: {}", widths.join(" "))?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &ViewModel) -> io::Result<()> {
        writeln!(self.out, "=={}== {}", view.header.title, view.header.progress)?;

        match &view.body {
            Body::List(list) => self.render_list(list)?,
            Body::Detail(detail) => self.render_detail(detail)?,
        }

        if let Some(notice) = &view.notice {
            writeln!(self.out, "  ! {notice}")?;
        }
        writeln!(self.out, "-- {}", view.footer.keybindings)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo};

    fn frame(body: Body) -> ViewModel {
        ViewModel {
            header: HeaderInfo {
                title: " Trending this week ".to_string(),
                progress: "page 1, 1 loaded".to_string(),
            },
            body,
            footer: FooterInfo { keybindings: ":quit".to_string() },
            notice: None,
        }
    }

    fn render_to_string(view: &ViewModel, poster_width: Option<u32>) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new(), poster_width);
        renderer.render(view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn list_rows_show_title_year_and_chosen_poster() {
        let view = frame(Body::List(ListViewModel {
            items: vec![DisplayItem {
                id: 603,
                title: "The Matrix".to_string(),
                year: Some(1999),
                poster_url: Some("https://img/w342/m.jpg".to_string()),
                poster_candidates: vec![
                    ImageCandidate { url: "https://img/w92/m.jpg".to_string(), width: 92 },
                    ImageCandidate { url: "https://img/w342/m.jpg".to_string(), width: 342 },
                ],
            }],
            loading: true,
            empty_state: None,
        }));

        let text = render_to_string(&view, Some(80));
        assert!(text.contains("The Matrix (1999)"));
        assert!(text.contains("https://img/w92/m.jpg"));
        assert!(text.contains("loading..."));
    }

    #[test]
    fn empty_state_replaces_rows() {
        let view = frame(Body::List(ListViewModel {
            items: vec![],
            loading: false,
            empty_state: Some(EmptyState {
                message: "No results found".to_string(),
                subtitle: "Nothing matches \"qqq\"".to_string(),
            }),
        }));
        let text = render_to_string(&view, None);
        assert!(text.contains("No results found"));
        assert!(!text.contains("loading"));
    }

    #[test]
    fn detail_lists_backdrop_sizes() {
        let view = frame(Body::Detail(DetailViewModel {
            id: 949,
            title: Some("Heat".to_string()),
            year: Some(1995),
            overview: None,
            rating: Some("7.9/10".to_string()),
            poster_url: None,
            backdrop_url: Some("https://img/w780/heat.jpg".to_string()),
            backdrop_candidates: vec![
                ImageCandidate { url: "https://img/w300/heat.jpg".to_string(), width: 300 },
                ImageCandidate { url: "https://img/w780/heat.jpg".to_string(), width: 780 },
            ],
            loading: false,
            error: None,
        }));

        let text = render_to_string(&view, None);
        assert!(text.contains("Heat (1995)"));
        assert!(text.contains("backdrop: https://img/w780/heat.jpg"));
        assert!(text.contains("backdrop sizes: 300px 780px"));
    }

    #[test]
    fn candidate_selection_prefers_smallest_adequate() {
        let candidates = vec![
            ImageCandidate { url: "w92".into(), width: 92 },
            ImageCandidate { url: "w185".into(), width: 185 },
            ImageCandidate { url: "w342".into(), width: 342 },
        ];
        assert_eq!(select_candidate(&candidates, 150).unwrap().url, "w185");
        assert_eq!(select_candidate(&candidates, 1000).unwrap().url, "w342");
        assert!(select_candidate(&[], 100).is_none());
    }
}
