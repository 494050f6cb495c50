//! Composition of several figures into one grid

use crate::figure::Figure;
use histostats_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rows and columns of a grid; unset dimensions are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub nrow: Option<usize>,
    pub ncol: Option<usize>,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nrow(mut self, nrow: usize) -> Self {
        self.nrow = Some(nrow);
        self
    }

    pub fn with_ncol(mut self, ncol: usize) -> Self {
        self.ncol = Some(ncol);
        self
    }

    /// Resolve `(nrow, ncol)` for `n` panels
    ///
    /// Without explicit dimensions panels fill a wide grid: up to three in one
    /// row, up to six in two rows, up to twelve in three rows, and a
    /// near-square grid beyond that.
    pub fn resolve(&self, n: usize) -> Result<(usize, usize)> {
        if n == 0 {
            return Err(Error::InvalidInput("no panels to lay out".to_string()));
        }
        let (nrow, ncol) = match (self.nrow, self.ncol) {
            (Some(0), _) | (_, Some(0)) => {
                return Err(Error::InvalidParameter(
                    "grid dimensions must be positive".to_string(),
                ))
            }
            (Some(nrow), Some(ncol)) => (nrow, ncol),
            (Some(nrow), None) => (nrow, n.div_ceil(nrow)),
            (None, Some(ncol)) => (n.div_ceil(ncol), ncol),
            (None, None) => default_dimensions(n),
        };
        if nrow * ncol < n {
            return Err(Error::InvalidParameter(format!(
                "a {nrow} x {ncol} grid cannot hold {n} panels"
            )));
        }
        Ok((nrow, ncol))
    }
}

fn default_dimensions(n: usize) -> (usize, usize) {
    match n {
        0..=3 => (1, n),
        4..=6 => (2, n.div_ceil(2)),
        7..=12 => (3, n.div_ceil(3)),
        _ => {
            let nrow = (n as f64).sqrt().ceil() as usize;
            (nrow, n.div_ceil(nrow))
        }
    }
}

/// Panel tag sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagLevels {
    /// `a, b, c, ...`
    Lower,
    /// `A, B, C, ...`
    Upper,
    /// `1, 2, 3, ...`
    Numeric,
    /// `i, ii, iii, ...`
    #[serde(rename = "roman")]
    LowerRoman,
    /// `I, II, III, ...`
    #[serde(rename = "ROMAN")]
    UpperRoman,
}

impl TagLevels {
    /// Tag of the panel at zero-based `index`
    pub fn tag(&self, index: usize) -> String {
        match self {
            Self::Lower => alphabetic(index),
            Self::Upper => alphabetic(index).to_ascii_uppercase(),
            Self::Numeric => (index + 1).to_string(),
            Self::LowerRoman => roman(index + 1).to_ascii_lowercase(),
            Self::UpperRoman => roman(index + 1),
        }
    }
}

/// `a..z, aa, ab, ...`
fn alphabetic(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'a' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// Tags and the grid-level title block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    pub tag_levels: Option<TagLevels>,
    pub tag_prefix: Option<String>,
    pub tag_suffix: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub caption: Option<String>,
}

impl Annotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag_levels(mut self, levels: TagLevels) -> Self {
        self.tag_levels = Some(levels);
        self
    }

    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = Some(prefix.into());
        self
    }

    pub fn with_tag_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.tag_suffix = Some(suffix.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Full tag of the panel at `index`, if tagging is on
    pub fn tag(&self, index: usize) -> Option<String> {
        self.tag_levels.map(|levels| {
            format!(
                "{}{}{}",
                self.tag_prefix.as_deref().unwrap_or(""),
                levels.tag(index),
                self.tag_suffix.as_deref().unwrap_or("")
            )
        })
    }
}

/// Figures arranged in a grid, in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeFigure {
    panels: Vec<Figure>,
    tags: Vec<Option<String>>,
    nrow: usize,
    ncol: usize,
    annotation: Annotation,
}

impl CompositeFigure {
    pub fn panels(&self) -> &[Figure] {
        &self.panels
    }

    pub fn tags(&self) -> &[Option<String>] {
        &self.tags
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    /// Iterate over `(row, col, panel, tag)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Figure, Option<&str>)> {
        let ncol = self.ncol;
        self.panels
            .iter()
            .zip(&self.tags)
            .enumerate()
            .map(move |(i, (panel, tag))| (i / ncol, i % ncol, panel, tag.as_deref()))
    }
}

/// Arrange `figures` according to `layout` and decorate with `annotation`
pub fn compose(
    figures: Vec<Figure>,
    layout: &GridLayout,
    annotation: &Annotation,
) -> Result<CompositeFigure> {
    let (nrow, ncol) = layout.resolve(figures.len())?;
    let tags = (0..figures.len()).map(|i| annotation.tag(i)).collect();
    debug!(panels = figures.len(), nrow, ncol, "Composing figure grid");
    Ok(CompositeFigure {
        panels: figures,
        tags,
        nrow,
        ncol,
        annotation: annotation.clone(),
    })
}
