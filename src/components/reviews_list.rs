use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::client;
use crate::models::review::CurrentUserReview;

/// The logged-in user's reviews, each with its spot preview and images.
#[component]
pub fn ReviewsList() -> impl IntoView {
    let (version, set_version) = create_signal(0u32);
    let reviews = create_local_resource(move || version.get(), |_| client::current_reviews());

    let delete_review = move |review_id: i64| {
        spawn_local(async move {
            match client::delete_review(review_id).await {
                Ok(()) => set_version.update(|v| *v += 1),
                Err(body) => log!("[CLIENT] Failed to delete review {}: {}", review_id, body.message),
            }
        });
    };

    view! {
        <div>
            <h3>{ "Manage Reviews" }</h3>
            <Transition fallback=move || view! { <p>"Loading..."</p> }>
                {move || reviews.get().map(|result| match result {
                    Ok(list) if list.is_empty() => view! { <p>"You haven't written any reviews yet."</p> }.into_view(),
                    Ok(list) => view! {
                        <ul>
                            {list.into_iter().map(|entry| review_entry(entry, delete_review)).collect_view()}
                        </ul>
                    }.into_view(),
                    Err(body) => view! { <p class="error">{body.message}</p> }.into_view(),
                })}
            </Transition>
        </div>
    }
}

fn review_entry(entry: CurrentUserReview, on_delete: impl Fn(i64) + 'static) -> impl IntoView {
    let CurrentUserReview { review, spot, images, .. } = entry;
    let review_id = review.id;
    let spot_name = spot.name;
    let alt_text = spot_name.clone();
    view! {
        <li class="review">
            <img class="preview" src=spot.preview_image alt=alt_text/>
            <h4>{spot_name}</h4>
            <p class="date">{review.updated_at}</p>
            <p class="stars">{format!("{} ★", review.stars)}</p>
            <p>{review.review}</p>
            <div class="review-images">
                {images
                    .into_iter()
                    .map(|image| view! { <img src=image.url alt="review image"/> })
                    .collect_view()}
            </div>
            <button on:click=move |_| on_delete(review_id)>{ "Delete" }</button>
        </li>
    }
}
