/// Fixed allowlists for one listing endpoint.
///
/// `filterable` are the fields a caller may filter on; `sortable` are the
/// real, indexed columns a caller may sort on. Both sets are closed at
/// compile time - anything outside them is rejected before any clause is
/// assembled.
#[derive(Debug)]
pub struct Surface {
    pub filterable: &'static [&'static str],
    pub sortable: &'static [&'static str],
}

/// Admin user listing
pub static ADMIN_USERS: Surface = Surface {
    filterable: &["name", "email", "address", "role"],
    sortable: &["name", "email", "role", "created_at"],
};

/// Admin store listing
pub static ADMIN_STORES: Surface = Surface {
    filterable: &["name", "email", "address"],
    sortable: &["name", "email", "address", "created_at"],
};

/// Store owner's own-stores listing
pub static OWNER_STORES: Surface = Surface {
    filterable: &["name", "email", "address"],
    sortable: &["name", "email", "address", "created_at"],
};

/// End-user store listing
pub static USER_STORES: Surface = Surface {
    filterable: &["name", "address"],
    sortable: &["name", "address", "created_at"],
};
