use leptos::ev::SubmitEvent;
use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::client;
use crate::models::message::ErrorBody;
use crate::models::user::SessionUser;
use crate::utils::validation::{login_ready, DEMO_CREDENTIAL, DEMO_PASSWORD};

/// Username/email + password login. Submission stays disabled until both
/// inputs are long enough; the server's field errors are shown inline.
#[component]
pub fn LoginForm(#[prop(into)] on_login: Callback<SessionUser>) -> impl IntoView {
    let (credential, set_credential) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (errors, set_errors) = create_signal(ErrorBody::default());

    let can_submit = move || login_ready(&credential.get(), &password.get());

    let submit = move |credential: String, password: String| {
        set_errors.set(ErrorBody::default());
        spawn_local(async move {
            match client::login(&credential, &password).await {
                Ok(user) => {
                    log!("[CLIENT] Logged in as {}", user.username);
                    on_login.call(user);
                }
                Err(body) => set_errors.set(body),
            }
        });
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if can_submit() {
            submit(credential.get(), password.get());
        }
    };

    let demo_login = move |_| submit(DEMO_CREDENTIAL.to_string(), DEMO_PASSWORD.to_string());

    view! {
        <div id="LogInForm">
            <h1>"Log In"</h1>
            <form on:submit=handle_submit>
                {move || {
                    errors.with(|e| {
                        e.field("credential")
                            .map(str::to_owned)
                            .or_else(|| (!e.message.is_empty()).then(|| e.message.clone()))
                    })
                    .map(|message| view! { <p class="error">{message}</p> })
                }}
                <label>
                    <input
                        type="text"
                        placeholder="Enter username or email"
                        prop:value=credential
                        on:input=move |e| set_credential.set(event_target_value(&e))
                    />
                </label>
                <label>
                    <input
                        type="password"
                        placeholder="Enter password"
                        prop:value=password
                        on:input=move |e| set_password.set(event_target_value(&e))
                    />
                </label>
                {move || {
                    errors.with(|e| e.field("password").map(str::to_owned))
                        .map(|message| view! { <p class="error">{message}</p> })
                }}
                <button
                    id="submitbutton"
                    type="submit"
                    disabled=move || !can_submit()
                    class=move || if can_submit() { "submitButton" } else { "submitButton disabled" }
                >
                    "Log In"
                </button>
                <span class="demoUserLink" on:click=demo_login>"Demo User"</span>
            </form>
        </div>
    }
}
