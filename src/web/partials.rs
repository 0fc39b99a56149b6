use clap::crate_version;
use maud::{html, Markup};

mod float;

pub use self::float::Float;

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://unpkg.com/bulma-prefers-dark";
        link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.4/css/all.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        style { ".error { color: hsl(348, 86%, 61%); }" }
    }
}

pub fn home_button() -> Markup {
    html! {
        a.navbar-item href="/" {
            img src="https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/svg/1f451.svg" width="28" height="28" alt="Home";
        }
    }
}

pub fn footer() -> Markup {
    html! {
        footer.footer {
            div.container {
                div.columns {
                    div.column."is-4" {
                        p.title."is-6" { "About" }
                        p."mt-1" {
                            span.icon-text.is-flex-wrap-nowrap {
                                span.icon { i.fas.fa-home.has-text-info {} }
                                span { "Clash Dashboard " (crate_version!()) }
                            }
                        }
                        p."mt-1" {
                            span.icon-text.is-flex-wrap-nowrap {
                                span.icon { i.fas.fa-heart.has-text-danger {} }
                                span {
                                    "Made with " a href="https://www.rust-lang.org/" { "Rust" }
                                    " and " a href="https://bulma.io/" { "Bulma" }
                                }
                            }
                        }
                    }

                    div.column."is-4" {
                        p.title."is-6" { "Data" }
                        p."mt-1" {
                            span.icon-text.is-flex-wrap-nowrap {
                                span.icon { i.fas.fa-database.has-text-success {} }
                                span {
                                    "Powered by the " a href="https://developer.clashroyale.com/" { "Clash Royale API" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
