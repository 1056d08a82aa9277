//! Integration tests for effective action resolution
//!
//! Covers both construction paths (compact definitions and the fluent
//! builder), scope hierarchies, multi-role queries and shared read-only use
//! across threads.

use cretoai_rbac::{Action, DefaultScopes, Rbac, RbacError, Role, Scope};
use std::sync::Arc;
use std::thread;

fn scope_hierarchy_definitions() -> Vec<(&'static str, &'static str)> {
    vec![
        ("all", "org;action10:all"),
        ("org", "group;action10:org"),
        ("group", "self;action10:group"),
        ("self", ";action10:self"),
        ("allSelfAndGroup", "all,self;action10:group"),
    ]
}

fn scope_hierarchy_builder() -> Rbac {
    let s = DefaultScopes::new();
    let mut builder = Rbac::builder();

    builder.role("self").unwrap().grant("action10", s.self_scope()).unwrap();
    builder
        .role("group")
        .unwrap()
        .inherit("self")
        .unwrap()
        .grant("action10", s.group())
        .unwrap();
    builder
        .role("org")
        .unwrap()
        .inherit("group")
        .unwrap()
        .grant("action10", s.org())
        .unwrap();
    builder
        .role("all")
        .unwrap()
        .inherit("org")
        .unwrap()
        .grant("action10", s.all())
        .unwrap();
    builder
        .role("allSelfAndGroup")
        .unwrap()
        .inherit("all")
        .unwrap()
        .inherit("self")
        .unwrap()
        .grant("action10", s.group())
        .unwrap();

    builder.build().unwrap()
}

fn assert_scope_hierarchy(rbac: &Rbac) {
    let s = DefaultScopes::new();
    let expect = |role: &str, scope: &Scope| {
        assert_eq!(
            rbac.get_allowed_actions([role]).unwrap(),
            vec![Action::new("action10", scope.clone())],
            "role {}",
            role
        );
    };

    expect("self", s.self_scope());
    expect("group", s.group());
    expect("org", s.org());
    expect("all", s.all());
    expect("allSelfAndGroup", s.all());
}

#[test]
fn test_definitions_resolve_allowed_actions() {
    let s = DefaultScopes::new();
    let rbac = Rbac::from_definitions(
        [
            ("role1", "role2;action10:self,action11:self"),
            ("role2", ";action20:org"),
        ],
        None,
    )
    .unwrap();

    assert_eq!(
        rbac.get_allowed_actions(["role1"]).unwrap(),
        vec![
            Action::new("action10", s.self_scope().clone()),
            Action::new("action11", s.self_scope().clone()),
            Action::new("action20", s.org().clone()),
        ]
    );
    assert_eq!(
        rbac.get_allowed_actions(["role2"]).unwrap(),
        vec![Action::new("action20", s.org().clone())]
    );
}

#[test]
fn test_definitions_respect_scope_hierarchy() {
    let rbac = Rbac::from_definitions(scope_hierarchy_definitions(), None).unwrap();
    assert_scope_hierarchy(&rbac);
}

#[test]
fn test_builder_resolves_allowed_actions() {
    let s = DefaultScopes::new();
    let mut builder = Rbac::builder();
    builder.role("role2").unwrap().grant("action20", s.org()).unwrap();
    builder
        .role("role1")
        .unwrap()
        .inherit("role2")
        .unwrap()
        .grant("action10", s.self_scope())
        .unwrap()
        .grant("action11", s.self_scope())
        .unwrap();
    let rbac = builder.build().unwrap();

    assert_eq!(
        rbac.get_allowed_actions(["role1"]).unwrap(),
        vec![
            Action::new("action10", s.self_scope().clone()),
            Action::new("action11", s.self_scope().clone()),
            Action::new("action20", s.org().clone()),
        ]
    );
}

#[test]
fn test_builder_respects_scope_hierarchy() {
    assert_scope_hierarchy(&scope_hierarchy_builder());
}

#[test]
fn test_prebuilt_roles() {
    let s = DefaultScopes::new();
    let roles = vec![
        Role::new("editor")
            .with_inherit("viewer")
            .with_action("write", s.group().clone()),
        Role::new("viewer").with_action("read", s.all().clone()),
    ];

    let rbac = Rbac::from_roles(roles, None).unwrap();
    let actions = rbac.get_allowed_actions(["editor"]).unwrap();
    assert_eq!(actions.len(), 2);
}

#[test]
fn test_prebuilt_roles_are_validated() {
    let roles = vec![Role::new("editor").with_inherit("viewer")];
    assert!(matches!(
        Rbac::from_roles(roles, None),
        Err(RbacError::Referential { .. })
    ));
}

#[test]
fn test_multiple_roles_merge_highest_scope() {
    let rbac = Rbac::from_definitions(
        [
            ("reader", ";read:group,list:self"),
            ("auditor", ";read:org,audit:all"),
        ],
        None,
    )
    .unwrap();

    let actions = rbac.get_allowed_actions(["reader", "auditor"]).unwrap();
    let by_name = |name: &str| actions.iter().find(|a| a.name == name).unwrap().scope.name.clone();

    assert_eq!(actions.len(), 3);
    assert_eq!(by_name("read"), "org");
    assert_eq!(by_name("list"), "self");
    assert_eq!(by_name("audit"), "all");
}

#[test]
fn test_unknown_role_query_fails() {
    let rbac = Rbac::from_definitions([("role1", ";action10:self")], None).unwrap();
    assert!(matches!(
        rbac.get_allowed_actions(["role1", "ghost"]),
        Err(RbacError::NotFound(_))
    ));
}

#[test]
fn test_cyclic_definitions_rejected() {
    let result = Rbac::from_definitions([("a", "b;"), ("b", "c;"), ("c", "a;")], None);
    assert!(matches!(result, Err(RbacError::Cycle(_))));
}

#[test]
fn test_deep_inheritance_chain() {
    const DEPTH: usize = 50_000;

    let definitions: Vec<(String, String)> = (0..DEPTH)
        .map(|i| {
            let inherits = if i + 1 < DEPTH { format!("r{}", i + 1) } else { String::new() };
            (format!("r{}", i), format!("{};action{}:self", inherits, i % 10))
        })
        .collect();

    let rbac = Rbac::from_definitions(definitions, None).unwrap();
    let actions = rbac.get_allowed_actions(["r0"]).unwrap();

    assert_eq!(actions.len(), 10);
    assert!(rbac.can(["r0"]).unwrap().perform("action9", None).is_granted());
}

#[test]
fn test_concurrent_read_only_queries() {
    let rbac = Arc::new(Rbac::from_definitions(scope_hierarchy_definitions(), None).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rbac = Arc::clone(&rbac);
            thread::spawn(move || {
                for _ in 0..100 {
                    let permission = rbac.can(["allSelfAndGroup"]).unwrap().perform("action10", None);
                    assert!(permission.is_granted());
                    assert_eq!(permission.action().scope.name, "all");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_rbac_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Rbac>();
}
