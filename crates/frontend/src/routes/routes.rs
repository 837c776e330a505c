use crate::domain::a001_laboratory::ui::list::LaboratoryList;
use crate::domain::a002_product::ui::list::ProductList;
use crate::domain::a003_batch::ui::list::BatchList;
use crate::layout::global_context::{AppGlobalContext, Section};
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::{use_auth, AuthState};
use crate::system::pages::login::LoginPage;
use crate::system::users::ui::UsersListPage;
use crate::usecases::u102_point_of_sale::PointOfSale;
use leptos::prelude::*;

/// Page for the current section; re-created when the section changes
#[component]
fn Content() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    move || match ctx.section.get() {
        Section::Laboratories => view! { <LaboratoryList /> }.into_any(),
        Section::Products => view! { <ProductList /> }.into_any(),
        Section::Batches => view! { <BatchList /> }.into_any(),
        Section::PointOfSale => view! { <PointOfSale /> }.into_any(),
        Section::Users => view! { <UsersListPage /> }.into_any(),
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // Adopt the location once, then keep it in sync
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Content /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    move || match auth_state.get() {
        AuthState::Authenticating => view! {
            <div class="app-splash">"Cargando..."</div>
        }
        .into_any(),
        AuthState::Anonymous => view! { <LoginPage /> }.into_any(),
        AuthState::Authenticated { .. } => view! { <MainLayout /> }.into_any(),
    }
}
