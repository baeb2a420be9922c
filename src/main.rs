#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
slint::include_modules!();

use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;
use slint::VecModel;
use tracing::{info, warn};

use colab_achievements::avatar::AvatarPixels;
use colab_achievements::lookup::run_lookup;
use colab_achievements::telemetry::{try_init_tracing, TracingConfig};
use colab_achievements::view::{render, SearchRequest, View, ViewController};
use colab_achievements::{AppConfig, ContributorClient};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    try_init_tracing(&TracingConfig::for_format(config.log_format))?;
    info!(base_url = %config.api_base_url, "starting contributor lookup");

    // Shared HTTP client
    let client = ContributorClient::from_config(&config)?;

    // Background tokio runtime for async HTTP
    let rt = Arc::new(tokio::runtime::Runtime::new()?);

    // Lives on the UI thread; the mutex lets resolutions be posted from the runtime.
    let controller = Arc::new(Mutex::new(ViewController::new(
        config.default_username.clone(),
    )));

    let app = AppWindow::new()?;
    apply_view(&app, &render(controller.lock().state()));

    // =============================================
    //  CALLBACK: query-edited
    // =============================================
    {
        let controller = controller.clone();
        app.on_query_edited(move |text| {
            controller.lock().on_query_text_change(text.as_str());
        });
    }

    // =============================================
    //  CALLBACK: search-requested
    // =============================================
    {
        let app_weak = app.as_weak();
        let controller = controller.clone();
        let client = client.clone();
        let rt = rt.clone();
        let avatar_size = config.avatar_size;

        app.on_search_requested(move || {
            let Some(app) = app_weak.upgrade() else { return };

            let request = {
                let mut controller = controller.lock();
                let request = controller.on_search_triggered();
                apply_view(&app, &render(controller.state()));
                request
            };
            let Some(request) = request else { return };

            app.set_avatar(slint::Image::default());
            spawn_lookup(
                &rt,
                client.clone(),
                controller.clone(),
                app_weak.clone(),
                request,
                avatar_size,
            );
        });
    }

    // =============================================
    //  CALLBACK: achievement-clicked
    // =============================================
    app.on_achievement_clicked(|link| {
        if link.is_empty() {
            return;
        }
        // Open the contribution in the native web browser
        if let Err(e) = open::that(link.as_str()) {
            warn!(error = %e, %link, "failed to open contribution link");
        }
    });

    // Run the Slint event loop
    app.run()?;

    Ok(())
}

/// Runs one lookup on the runtime and posts its outcome back to the UI thread.
///
/// The contributor is posted as soon as it arrives; the avatar follows in a
/// second post and is dropped if another search has replaced the card.
fn spawn_lookup(
    rt: &tokio::runtime::Runtime,
    client: ContributorClient,
    controller: Arc<Mutex<ViewController>>,
    app_weak: slint::Weak<AppWindow>,
    request: SearchRequest,
    avatar_size: u32,
) {
    rt.spawn(async move {
        let resolve = {
            let controller = controller.clone();
            let app_weak = app_weak.clone();
            move |generation, outcome| {
                post_to_ui(move || {
                    let Some(app) = app_weak.upgrade() else { return };
                    let mut controller = controller.lock();
                    if controller.on_fetch_resolved(generation, outcome) {
                        apply_view(&app, &render(controller.state()));
                    }
                });
            }
        };

        let show_avatar = move |generation, pixels: AvatarPixels| {
            post_to_ui(move || {
                let Some(app) = app_weak.upgrade() else { return };
                if controller.lock().shows_result_of(generation) {
                    app.set_avatar(avatar_image(&pixels));
                }
            });
        };

        run_lookup(&client, request, avatar_size, resolve, show_avatar).await;
    });
}

fn post_to_ui(update: impl FnOnce() + Send + 'static) {
    if let Err(e) = slint::invoke_from_event_loop(update) {
        warn!(error = %e, "event loop closed before lookup resolved");
    }
}

/// Pushes a rendered view into the window properties.
fn apply_view(app: &AppWindow, view: &View) {
    app.set_app_title(view.title.into());

    // Avoid resetting the cursor of the line edit while the user types.
    if app.get_query_text().as_str() != view.query.text {
        app.set_query_text(view.query.text.as_str().into());
    }
    app.set_query_placeholder(view.query.placeholder.into());
    app.set_button_label(view.search_button.label.into());
    app.set_button_enabled(view.search_button.enabled);
    app.set_error_message(view.error.as_deref().unwrap_or_default().into());

    match &view.profile {
        Some(profile) => {
            let rows: Vec<AchievementRow> = profile
                .achievements
                .items()
                .iter()
                .map(|item| AchievementRow {
                    text: item.text.as_str().into(),
                    link: item.link.as_deref().unwrap_or_default().into(),
                })
                .collect();

            app.set_heading(profile.heading.as_str().into());
            app.set_achievements_heading(profile.achievements_heading.into());
            app.set_achievements_placeholder(
                profile.achievements.placeholder().unwrap_or_default().into(),
            );
            app.set_achievements(Rc::new(VecModel::from(rows)).into());
            app.set_has_result(true);
        }
        None => {
            app.set_has_result(false);
            app.set_achievements(Rc::new(VecModel::<AchievementRow>::default()).into());
        }
    }
}

fn avatar_image(pixels: &AvatarPixels) -> slint::Image {
    let buffer = slint::SharedPixelBuffer::<slint::Rgba8Pixel>::clone_from_slice(
        &pixels.rgba,
        pixels.width,
        pixels.height,
    );
    slint::Image::from_rgba8(buffer)
}
