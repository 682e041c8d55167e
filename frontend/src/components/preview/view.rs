//! View rendering for the preview/editor component.
//!
//! The UI is a toolbar (edit toggle, paste, copy, print, download, save), a
//! tab bar over the named content sections, and the preview iframe hosting
//! the transformed document. The iframe is rendered unconditionally so its
//! handle exists before the first content load.
//!
//! User-facing text stays in Indonesian by design.

use yew::html::Scope;
use yew::prelude::*;

use super::helpers::compute_md5;
use super::messages::Msg;
use super::state::PreviewComponent;

pub fn view(component: &PreviewComponent, ctx: &Context<PreviewComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="preview-root">
            { build_toolbar(component, link) }
            { build_tab_bar(component, link) }
            <iframe
                class="preview-frame"
                ref={component.iframe_ref.clone()}
                sandbox="allow-scripts allow-same-origin allow-modals"
                onload={link.callback(|_: Event| Msg::EmbeddedLoaded)}
                style="width:100%;min-height:70vh;border:1px solid #ddd;border-radius:4px;background:#fff;"
            />
        </div>
    }
}

fn build_toolbar(component: &PreviewComponent, link: &Scope<PreviewComponent>) -> Html {
    let edit_label = if component.edit_mode { "Selesai" } else { "Edit" };
    let edit_icon = if component.edit_mode { "done" } else { "edit" };

    html! {
        <div class="icon-toolbar">
            { icon_button(edit_icon, edit_label, link.callback(|_| Msg::ToggleEditMode)) }
            { icon_button("content_paste", "Tempel", link.callback(|_| Msg::PasteFromClipboard)) }
            { icon_button("content_copy", "Salin", link.callback(|_| Msg::CopyHtml)) }
            { icon_button("print", "Cetak", link.callback(|_| Msg::PrintDocument)) }
            { icon_button("download", "Unduh", link.callback(|_| Msg::DownloadHtml)) }
            { icon_button("save", "Simpan", link.callback(|_| Msg::Save)) }
        </div>
    }
}

/// One tab per section; the active tab shows a red dot while the canonical
/// content differs from the last saved state.
fn build_tab_bar(component: &PreviewComponent, link: &Scope<PreviewComponent>) -> Html {
    if component.sections.is_empty() {
        return html! {};
    }

    let tabs = component
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let active = index == component.active_section;
            let dirty = active
                && component
                    .saved_md5
                    .get(index)
                    .and_then(|digest| digest.as_ref())
                    .map_or(false, |digest| digest != &compute_md5(&section.html));

            html! {
                <button
                    class={classes!("tab-btn", if active { "active" } else { "" })}
                    onclick={link.callback(move |_| Msg::SetSection(index))}
                    style="position: relative;"
                >
                    { section.title.clone() }
                    {
                        if dirty {
                            html! {
                                <span
                                    title="Perubahan belum disimpan"
                                    style="position:absolute;top:4px;right:6px;width:8px;height:8px;background:#e53935;border-radius:50%;display:inline-block;"
                                />
                            }
                        } else {
                            html! {}
                        }
                    }
                </button>
            }
        })
        .collect::<Html>();

    html! { <div class="tab-bar">{ tabs }</div> }
}

fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>) -> Html {
    html! {
        <button class="icon-btn" onclick={on_click}>
            <i class="material-icons">{icon_name}</i>
            <span class="icon-label">{label}</span>
        </button>
    }
}
