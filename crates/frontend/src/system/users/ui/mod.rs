use contracts::system::users::UserProfile;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::badge::FlagBadge;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_controller::{ListController, MutationStrategy};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::users::api::{self, UserListController};

fn or_dash(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    let ctl: UserListController = ListController::new(
        api::SERVICE,
        MutationStrategy::Refetch,
        |u: &UserProfile| u.id,
        (),
    );
    ctl.fetch();

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"Usuarios"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctl.fetch()
                        disabled=Signal::derive(move || ctl.state.with(|s| s.is_loading()))
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            {move || {
                ctl.state.with(|s| s.error.clone()).map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })
            }}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Usuario"</TableHeaderCell>
                            <TableHeaderCell>"Nombre"</TableHeaderCell>
                            <TableHeaderCell>"RUT"</TableHeaderCell>
                            <TableHeaderCell>"Email"</TableHeaderCell>
                            <TableHeaderCell>"Estado"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let users = ctl.state.with(|s| s.items.clone());
                            if users.is_empty() && !ctl.state.with(|s| s.is_loading()) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="5">"No hay usuarios."</TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            users
                                .into_iter()
                                .map(|user| {
                                    let full_name = user.full_name();
                                    view! {
                                        <TableRow>
                                            <TableCell><strong>{user.username}</strong></TableCell>
                                            <TableCell>{or_dash(Some(full_name))}</TableCell>
                                            <TableCell>{or_dash(user.rut)}</TableCell>
                                            <TableCell>{or_dash(user.email)}</TableCell>
                                            <TableCell>
                                                <FlagBadge value=user.is_active yes="Activo" no="Inactivo" />
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </TableBody>
                </Table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || ctl.state.with(|s| s.page))
                total_pages=Signal::derive(move || ctl.state.with(|s| s.total_pages()))
                total_count=Signal::derive(move || ctl.state.with(|s| s.count))
                on_page_change=Callback::new(move |page| ctl.go_to_page(page))
            />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path_has_only_page() {
        assert_eq!(api::SERVICE.page_path(2, &()), "/usuarios/?page=2");
        assert_eq!(or_dash(Some("  ".into())), "-");
        assert_eq!(or_dash(None), "-");
    }
}
