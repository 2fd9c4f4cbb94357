/// The identity of whoever is invoking a service, resolved up front by the
/// application and passed in explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller<UserId> {
    /// The authenticated user
    pub user_id: UserId,
    /// Whether the user may act on listings they do not own
    pub is_admin: bool,
}

impl<UserId: PartialEq> Caller<UserId> {
    /// A caller that is not an admin
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    /// A caller with admin rights
    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }

    /// Whether this caller may mutate something owned by `owner_id`.
    pub fn can_manage(&self, owner_id: &UserId) -> bool {
        self.is_admin || &self.user_id == owner_id
    }
}
