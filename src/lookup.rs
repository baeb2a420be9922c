//! One search, from request to avatar.

use tracing::debug;

use crate::avatar::AvatarPixels;
use crate::client::{ContributorClient, FetchError};
use crate::models::Contributor;
use crate::view::SearchRequest;

/// Runs the lookup for `request`.
///
/// `resolve` receives the contributor outcome as soon as the backend answers.
/// The avatar is fetched only afterwards and handed to `show_avatar` if it
/// could be downloaded, so a slow image host never delays the result.
pub async fn run_lookup<R, A>(
    client: &ContributorClient,
    request: SearchRequest,
    avatar_size: u32,
    resolve: R,
    show_avatar: A,
) where
    R: FnOnce(u64, Result<Contributor, FetchError>),
    A: FnOnce(u64, AvatarPixels),
{
    let outcome = client.fetch_contributor(&request.username).await;
    let avatar_url = outcome.as_ref().ok().map(|c| c.avatar_url.clone());
    resolve(request.generation, outcome);

    let Some(avatar_url) = avatar_url else {
        return;
    };
    match client.fetch_avatar(&avatar_url, avatar_size).await {
        Some(pixels) => show_avatar(request.generation, pixels),
        None => debug!(generation = request.generation, "no avatar to show"),
    }
}
