use super::{item_group, ItemGroupView};
use crate::{classify::Category, tree::ProjectModel};
use serde::Serialize;
use tera::Context;

#[derive(Debug, Serialize)]
struct FolderView<'a> {
    include: &'a str,
    identifier: &'a str,
    extensions: Option<&'static str>,
}

pub(super) fn make_context(model: &ProjectModel) -> Context {
    let folders: Vec<FolderView> = model
        .folders()
        .map(|folder| FolderView {
            include: &folder.filter_path,
            identifier: &folder.identifier,
            extensions: folder.extensions,
        })
        .collect();

    // Entries point at folders by path; identifiers only appear on declarations.
    let groups: Vec<ItemGroupView> = [Category::Header, Category::Source, Category::Resource]
        .into_iter()
        .map(|category| item_group(model, category))
        .collect();

    let mut context = Context::new();
    context.insert("folders", &folders);
    context.insert("groups", &groups);

    context
}
