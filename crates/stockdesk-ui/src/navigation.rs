//! Static menu trees for the horizontal and vertical layouts.

use serde::Serialize;

/// Icon token with an optional pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavIcon {
    /// Icon token.
    pub icon: &'static str,
    /// Size override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u16>,
}

/// Leaf entry pointing at a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Label.
    pub title: &'static str,
    /// Route name.
    pub to: &'static str,
    /// Icon.
    pub icon: NavIcon,
}

/// Menu entry: a link or a titled group of links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavItem {
    /// Top-level link.
    Link(NavLink),
    /// Collapsible group.
    Group {
        /// Label.
        title: &'static str,
        /// Icon.
        icon: NavIcon,
        /// Links inside the group.
        children: &'static [NavLink],
    },
}

const CHILD_ICON_SIZE: Option<u16> = Some(20);

const fn child(title: &'static str, to: &'static str, icon: &'static str) -> NavLink {
    NavLink {
        title,
        to,
        icon: NavIcon {
            icon,
            size: CHILD_ICON_SIZE,
        },
    }
}

const fn group(title: &'static str, icon: &'static str, children: &'static [NavLink]) -> NavItem {
    NavItem::Group {
        title,
        icon: NavIcon { icon, size: None },
        children,
    }
}

const DASHBOARD: NavItem = NavItem::Link(NavLink {
    title: "Dashboard",
    to: "dashboard",
    icon: NavIcon {
        icon: "tabler-smart-home",
        size: None,
    },
});

const ACCESS_CONTROL_LINKS: &[NavLink] = &[
    child("Roles & Rankings", "roles", "tabler-shield-check"),
    child("Permissions", "permissions", "tabler-key"),
    child("Security Matrix", "permission-matrix", "tabler-layout-grid"),
    child("User Management", "users", "tabler-user-cog"),
];

const ACCESS_CONTROL: NavItem =
    group("Access Control", "tabler-lock-access", ACCESS_CONTROL_LINKS);

const DIRECTORY_LINKS: &[NavLink] = &[
    child("Suppliers", "suppliers", "tabler-building-store"),
    child("Debtors", "debtors", "tabler-coin"),
];

const DIRECTORY: NavItem = group("Directory", "tabler-address-book", DIRECTORY_LINKS);

const INVENTORY_AND_CATALOG_LINKS: &[NavLink] = &[
    child("Categories", "categories", "tabler-hierarchy-2"),
    child("Products", "products", "tabler-package"),
    child("Stock Management", "product-inventory", "tabler-building-warehouse"),
];

const INVENTORY_AND_CATALOG: NavItem = group(
    "Inventory & Catalog",
    "tabler-box-seam",
    INVENTORY_AND_CATALOG_LINKS,
);

const FINANCIALS_LINKS: &[NavLink] = &[
    child("Transactions", "transactions", "tabler-receipt-2"),
    child("Payments", "payments", "tabler-wallet"),
];

const FINANCIALS: NavItem = group("Financials", "tabler-report-money", FINANCIALS_LINKS);

/// Menu of the horizontal layout.
pub const HORIZONTAL: &[NavItem] = &[
    DASHBOARD,
    ACCESS_CONTROL,
    DIRECTORY,
    INVENTORY_AND_CATALOG,
    FINANCIALS,
];

/// Menu of the vertical layout.
pub const VERTICAL: &[NavItem] = &[DASHBOARD, ACCESS_CONTROL, DIRECTORY];

/// Every link in `menu`, groups flattened in order.
pub fn links(menu: &'static [NavItem]) -> impl Iterator<Item = &'static NavLink> {
    menu.iter().flat_map(|item| match item {
        NavItem::Link(link) => std::slice::from_ref(link),
        NavItem::Group { children, .. } => *children,
    })
}

/// Label of `route` in the horizontal menu, which is a superset of the vertical one.
#[must_use]
pub fn title_for(route: &str) -> Option<&'static str> {
    let route = route.trim_start_matches('/');
    links(HORIZONTAL)
        .find(|link| link.to == route)
        .map(|link| link.title)
}
