use leptos::*;

pub const MAX_STARS: u8 = 5;

/// Star picker state. Hovering previews a value until a click locks it in;
/// leaving the picker without a locked value clears the preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarSelection {
    value: u8,
    locked: bool,
}

impl StarSelection {
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn hover(&mut self, stars: u8) {
        if !self.locked {
            self.value = stars.min(MAX_STARS);
        }
    }

    pub fn click(&mut self, stars: u8) {
        self.value = stars.min(MAX_STARS);
        self.locked = true;
    }

    pub fn leave(&mut self) {
        if !self.locked {
            self.value = 0;
        }
    }
}

#[component]
pub fn StarRating(selection: RwSignal<StarSelection>) -> impl IntoView {
    view! {
        <div class="star-rating">
            <div class="stars" on:mouseleave=move |_| selection.update(|s| s.leave())>
                {(1..=MAX_STARS)
                    .map(|star| {
                        view! {
                            <span
                                class=move || {
                                    if star <= selection.get().value() { "star filled" } else { "star empty" }
                                }
                                on:mouseenter=move |_| selection.update(|s| s.hover(star))
                                on:click=move |_| selection.update(|s| s.click(star))
                            >
                                "★"
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
            <p>{move || format!("{} Stars", selection.get().value())}</p>
        </div>
    }
}
