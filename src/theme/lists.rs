//! Tag and item lists shared by the item and tag-detail views.

use crate::context::tag_path;
use crate::types::{Item, Tag};
use maud::{Markup, html};

/// Links to each tag's detail page, in the order given.
pub fn tag_list<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Markup {
    html! {
        ul.tag-list {
            @for tag in tags {
                li { a href=(tag_path(tag)) { (tag) } }
            }
        }
    }
}

/// Item summaries in the order given: title link, tags, description.
pub fn item_list(items: &[&Item]) -> Markup {
    html! {
        ul.item-list {
            @for item in items {
                li {
                    article {
                        h1 { a href=(item.path) { (item.title) } }
                        @if !item.tags.is_empty() {
                            (tag_list(&item.tags))
                        }
                        @if !item.description.is_empty() {
                            p { (item.description) }
                        }
                    }
                }
            }
        }
    }
}
