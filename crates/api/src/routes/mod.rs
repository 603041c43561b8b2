pub mod auth;
pub mod boards;
pub mod cards;
pub mod comments;
pub mod health;
pub mod lists;
pub mod members;
pub mod projects;
pub mod tags;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the route tree (paths are mounted at the server root).
///
/// ```text
/// POST   /auth/login                      login (public)
///
/// GET    /members                         member directory
/// GET    /projects                        project listing
/// GET    /projects/{fkpoid}/boards        boards of a project
///
/// POST   /boards                          create board (+ default lists)
/// PATCH  /boards/{boardid}                partial update / replace members
/// DELETE /boards/{boardid}                cascade delete (admin only)
/// GET    /boards/{boardid}/kanban         full tree + live progress, by
///                                         external id (public, viewer-gated)
/// GET    /boards/{boardid}/share          issue a viewer token (external id)
/// PATCH  /boards/{boardid}/close          close when progress = 100
///                                         (external id)
///
/// POST   /boards/{boardid}/lists          append a list (external id)
/// DELETE /lists/{listid}                  cascade delete + re-densify
/// PATCH  /lists/reorder                   splice-reorder a board's lists
///
/// POST   /lists/{listid}/cards            append a card
/// DELETE /cards/{cardid}                  cascade delete + re-densify
/// PATCH  /cards/move                      move a card between lists
/// PUT    /cards/{cardid}                  multipart field/image update
///
/// POST   /cards/{cardid}/tasks            add a task
/// PATCH  /tasks/{taskid}                  partial task update
/// DELETE /tasks/{taskid}                  delete a task
/// POST   /cards/{cardid}/tags             add a tag
/// DELETE /tags/{tagid}                    delete a tag
/// POST   /cards/{cardid}/comments         add a comment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(members::router())
        .merge(projects::router())
        .merge(boards::router())
        .merge(lists::router())
        .merge(cards::router())
        .merge(tasks::router())
        .merge(tags::router())
        .merge(comments::router())
}
