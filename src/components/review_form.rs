use leptos::ev::SubmitEvent;
use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use super::star_rating::{StarRating, StarSelection};
use crate::client;
use crate::models::message::ErrorBody;
use crate::models::review::Review;
use crate::utils::validation::review_draft_error;

#[component]
pub fn ReviewForm(
    spot_id: i64,
    #[prop(optional, into)] on_created: Option<Callback<Review>>,
) -> impl IntoView {
    let (review_content, set_review_content) = create_signal(String::new());
    let stars = create_rw_signal(StarSelection::default());
    let (errors, set_errors) = create_signal(ErrorBody::default());

    let submit_review = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_errors.set(ErrorBody::default());

        let text = review_content.get();
        let rating = stars.get().value();
        if let Some(message) = review_draft_error(&text, rating) {
            set_errors.set(ErrorBody::new(message));
            return;
        }

        spawn_local(async move {
            match client::create_review(spot_id, &text, rating).await {
                Ok(review) => {
                    log!("[CLIENT] Review {} created for spot {}", review.id, spot_id);
                    set_review_content.set(String::new());
                    stars.set(StarSelection::default());
                    if let Some(on_created) = on_created {
                        on_created.call(review);
                    }
                }
                Err(body) => set_errors.set(body),
            }
        });
    };

    view! {
        <div id="review-modal">
            <h2>"How was your stay?"</h2>
            {move || {
                errors.with(|e| (!e.message.is_empty()).then(|| e.message.clone()))
                    .map(|message| view! { <p class="error">{message}</p> })
            }}
            {move || {
                errors.with(|e| e.errors.clone().unwrap_or_default())
                    .into_iter()
                    .map(|(field, message)| view! { <p class="error" data-field=field>{message}</p> })
                    .collect_view()
            }}
            <form on:submit=submit_review>
                <textarea
                    placeholder="Leave your review here..."
                    prop:value=review_content
                    on:input=move |e| set_review_content.set(event_target_value(&e))
                />
                <StarRating selection=stars/>
                <button type="submit">"Submit Your Review"</button>
            </form>
        </div>
    }
}
