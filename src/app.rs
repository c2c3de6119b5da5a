/// Main application entry point for SpotStay.
/// Wires the session state, login form, review form and review list into the router.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::client;
use crate::components::{login_form::LoginForm, review_form::ReviewForm, reviews_list::ReviewsList};
use crate::models::review::Review;
use crate::models::user::SessionUser;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Signal holding the logged-in user, if any.
    let user = create_rw_signal(None::<SessionUser>);
    let restored = create_local_resource(|| (), |_| client::restore_session());
    create_effect(move |_| {
        if let Some(Ok(session)) = restored.get() {
            user.set(session);
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/spotstay.css"/>
        <Title text="SpotStay"/>
        <Router>
            <nav>
                <A href="/">"SpotStay"</A>
                <Show when=move || user.with(Option::is_some)>
                    <A href="/reviews/current">"Manage Reviews"</A>
                    <LogoutButton user=user/>
                </Show>
            </nav>
            <main>
                <Routes>
                    <Route path="/" view=move || view! { <HomePage user=user/> }/>
                    <Route path="/reviews/current" view=ReviewsList/>
                    <Route path="/spots/:spot_id/review" view=SpotReviewPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage(user: RwSignal<Option<SessionUser>>) -> impl IntoView {
    view! {
        <h1>{ "SpotStay" }</h1>
        {move || match user.get() {
            Some(current) => view! {
                <p>{format!("Welcome back, {} {}!", current.first_name, current.last_name)}</p>
            }.into_view(),
            None => view! {
                <LoginForm on_login=move |logged_in: SessionUser| user.set(Some(logged_in))/>
            }.into_view(),
        }}
    }
}

#[component]
fn LogoutButton(user: RwSignal<Option<SessionUser>>) -> impl IntoView {
    let logout = move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            if client::logout().await.is_ok() {
                user.set(None);
            }
        });
    };
    view! { <button on:click=logout>"Log Out"</button> }
}

#[component]
fn SpotReviewPage() -> impl IntoView {
    let params = use_params_map();
    let spot_id = move || params.with(|p| p.get("spot_id").and_then(|id| id.parse::<i64>().ok()));
    let navigate = use_navigate();

    view! {
        {move || match spot_id() {
            Some(id) => {
                let navigate = navigate.clone();
                view! {
                    <ReviewForm
                        spot_id=id
                        on_created=move |_: Review| navigate("/reviews/current", Default::default())
                    />
                }.into_view()
            }
            None => view! { <p>"Spot couldn't be found"</p> }.into_view(),
        }}
    }
}
