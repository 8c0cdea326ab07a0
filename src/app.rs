//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::layout::Layout;
use crate::components::require_roles::RequireRoles;
use crate::components::toast_host::ToastHost;
use crate::net::api::Api;
use crate::pages::{
    dashboard::DashboardPage, forbidden::ForbiddenPage, login::LoginPage, patents::PatentsPage,
    register::RegisterPage,
};
use crate::state::roles::Role;
use crate::state::session;
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, toast queue, and API gateway contexts, then sets up
/// client-side routing. Guarded routes wrap their page in `RequireRoles` and
/// the navigation `Layout`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(session::load());
    let toasts = RwSignal::new(ToastState::default());
    provide_context(session);
    provide_context(toasts);
    provide_context(Api { session, toasts });

    view! {
        <Stylesheet id="leptos" href="/pkg/sgpi.css"/>
        <Title text="Patent Workflow"/>

        <Router>
            <ToastHost/>
            <Routes fallback=|| view! { <NotFoundRedirect/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("403") view=ForbiddenPage/>
                <Route
                    path=StaticSegment("register")
                    view=|| {
                        view! {
                            <RequireRoles allowed=vec![Role::Admin]>
                                <Layout>
                                    <RegisterPage/>
                                </Layout>
                            </RequireRoles>
                        }
                    }
                />
                <Route
                    path=StaticSegment("patent-list")
                    view=|| {
                        view! {
                            <RequireRoles allowed=vec![Role::Admin, Role::User, Role::Viewer]>
                                <Layout>
                                    <PatentsPage/>
                                </Layout>
                            </RequireRoles>
                        }
                    }
                />
                <Route
                    path=StaticSegment("dashboard")
                    view=|| {
                        view! {
                            <RequireRoles allowed=vec![Role::Admin, Role::User, Role::Viewer]>
                                <Layout>
                                    <DashboardPage/>
                                </Layout>
                            </RequireRoles>
                        }
                    }
                />
                <Route
                    path=StaticSegment("")
                    view=|| {
                        view! {
                            <RequireRoles allowed=vec![Role::Admin, Role::User, Role::Viewer]>
                                <Layout>
                                    <PatentsPage/>
                                </Layout>
                            </RequireRoles>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}

/// Unknown routes bounce to the login view, which forwards authenticated
/// sessions on to the patent list.
#[component]
fn NotFoundRedirect() -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move || {
        navigate("/login", NavigateOptions::default());
    });
}
