// @generated by protoc-gen-permfilter. DO NOT EDIT.
// source: acct/account.proto
//
// Include this file in the module holding the prost output for package `acct`.
// One item per line, unformatted; run rustfmt over it to read it.

const _: () = {
    static PERM_IDX_ACCOUNT_EMAIL: ::permfilter::PermissionSlot = ::permfilter::PermissionSlot::new();
    static PERM_IDX_ACCOUNT_PHONE: ::permfilter::PermissionSlot = ::permfilter::PermissionSlot::new();
    static PERM_IDX_ACCOUNT_TAGS: ::permfilter::PermissionSlot = ::permfilter::PermissionSlot::new();
    static PERM_IDX_ACCOUNT_OWNER: ::permfilter::PermissionSlot = ::permfilter::PermissionSlot::new();
    static PERM_IDX_ACCOUNT_NICKNAME: ::permfilter::PermissionSlot = ::permfilter::PermissionSlot::new();

    #[automatically_derived]
    impl ::permfilter::FilterFields for Account {
        fn register_permissions() {
            static REGISTERED: ::std::sync::Once = ::std::sync::Once::new();
            REGISTERED.call_once(|| {
                let registry = ::permfilter::Registry::global();
                let perm_0 = registry.register("fixture.acct.email");
                let perm_1 = registry.register("fixture.acct.phone");
                let perm_2 = registry.register("fixture.acct.tags");
                let perm_3 = registry.register("fixture.acct.owner");
                let perm_4 = registry.register("fixture.acct.nickname");
                PERM_IDX_ACCOUNT_EMAIL.bind(perm_0);
                PERM_IDX_ACCOUNT_PHONE.bind(perm_1);
                PERM_IDX_ACCOUNT_TAGS.bind(perm_2);
                PERM_IDX_ACCOUNT_OWNER.bind(perm_3);
                PERM_IDX_ACCOUNT_NICKNAME.bind(perm_4);
            });
        }

        fn filter_fields(&mut self, mask: &::permfilter::BitSet) {
            <Self as ::permfilter::FilterFields>::register_permissions();
            if !mask.has_slot(&PERM_IDX_ACCOUNT_EMAIL) {
                if ::core::matches!(self.contact, ::core::option::Option::Some(account::Contact::Email(_))) {
                    self.contact = ::core::option::Option::None;
                }
            }
            if !mask.has_slot(&PERM_IDX_ACCOUNT_PHONE) {
                if ::core::matches!(self.contact, ::core::option::Option::Some(account::Contact::Phone(_))) {
                    self.contact = ::core::option::Option::None;
                }
            }
            if !mask.has_slot(&PERM_IDX_ACCOUNT_TAGS) {
                self.tags = ::core::default::Default::default();
            }
            if !mask.has_slot(&PERM_IDX_ACCOUNT_OWNER) {
                self.owner = ::core::option::Option::None;
            }
            if !mask.has_slot(&PERM_IDX_ACCOUNT_NICKNAME) {
                self.nickname = ::core::option::Option::None;
            }
        }
    }
};

/// Registers every permission checked by the filters generated from `acct/account.proto`.
///
/// Call once at startup, before the first redaction, to fix index order.
pub fn init_account_filters() {
    <Account as ::permfilter::FilterFields>::register_permissions();
}
