//! Display projection of the author snapshot.
//!
//! Layout and styling belong to the host UI; this only shapes what each
//! tile shows and how tiles are keyed.

use crate::model::Author;
use serde::Serialize;

pub const AUTHOR_LIST_TITLE: &str = "My List of Authors";

/// One rendered author entry, keyed by record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorTile {
    pub key: String,
    pub name: String,
    pub birthdate: String,
}

impl AuthorTile {
    /// Returns `None` for records that were never saved.
    pub fn from_author(author: &Author) -> Option<Self> {
        let id = author.id?;
        Some(Self {
            key: id.to_string(),
            name: author.name.clone(),
            birthdate: author.birthdate.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorListView {
    pub title: &'static str,
    pub tiles: Vec<AuthorTile>,
}

impl AuthorListView {
    pub fn from_authors(authors: &[Author]) -> Self {
        Self {
            title: AUTHOR_LIST_TITLE,
            tiles: authors.iter().filter_map(AuthorTile::from_author).collect(),
        }
    }

    /// Title line followed by one `name (birthdate)` line per tile.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.tiles.len() + 1);
        lines.push(self.title.to_string());
        lines.extend(
            self.tiles
                .iter()
                .map(|tile| format!("{} ({})", tile.name, tile.birthdate)),
        );
        lines
    }
}
