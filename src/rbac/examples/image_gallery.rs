//! Image Gallery Example
//!
//! Demonstrates scoped authorization in an application:
//! 1. Define roles with compact definitions
//! 2. Check whether a user's roles permit `getImage` at all
//! 3. Walk the per-scope verdicts to decide which images the user may see

use cretoai_rbac::{Permission, Rbac};
use std::collections::HashMap;

/// Authenticated user, as provided by the embedding application
struct User {
    name: &'static str,
    groups: Vec<&'static str>,
    org: &'static str,
    roles: Vec<&'static str>,
}

/// Stored image with its ownership at every scope
struct Image {
    owned_by_user: &'static str,
    owned_by_group: &'static str,
    owned_by_org: &'static str,
}

struct Gallery {
    rbac: Rbac,
    images: HashMap<&'static str, Image>,
}

impl Gallery {
    fn get_image(&self, user: &User, image_id: &str) -> Result<Option<&Image>, Box<dyn std::error::Error>> {
        let permission = self.rbac.can(&user.roles)?.perform("getImage", None);
        if !permission.is_granted() {
            println!("  {} (roles {:?}) may not perform 'getImage'", user.name, user.roles);
            return Ok(None);
        }

        let Some(image) = self.images.get(image_id) else {
            return Ok(None);
        };
        Ok(visible(user, &permission, image)?.then_some(image))
    }
}

fn visible(user: &User, permission: &Permission, image: &Image) -> cretoai_rbac::Result<bool> {
    Ok((permission.scope("self")?.granted && image.owned_by_user == user.name)
        || (permission.scope("group")?.granted && user.groups.contains(&image.owned_by_group))
        || (permission.scope("org")?.granted && image.owned_by_org == user.org)
        || permission.scope("all")?.granted)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Scoped RBAC Image Gallery Example ===\n");

    // Step 1: Define roles
    println!("Step 1: Defining roles...");
    let rbac = Rbac::from_definitions(
        [
            ("user", ";getImage:self"),
            ("groupAdmin", "user;getImage:group"),
            ("orgAdmin", "groupAdmin;getImage:org"),
            ("superAdmin", "orgAdmin;getImage:all"),
            ("guest", ";listImages:all"),
        ],
        None,
    )?;
    for name in rbac.role_names() {
        println!("✓ {}", name);
    }

    let gallery = Gallery {
        rbac,
        images: HashMap::from([(
            "img-1",
            Image {
                owned_by_user: "alice",
                owned_by_group: "designers",
                owned_by_org: "acme",
            },
        )]),
    };

    // Step 2: Query as different users
    println!("\nStep 2: Requesting img-1 as different users...");
    let users = [
        User { name: "alice", groups: vec!["designers"], org: "acme", roles: vec!["user"] },
        User { name: "bob", groups: vec!["designers"], org: "acme", roles: vec!["user"] },
        User { name: "carol", groups: vec!["designers"], org: "acme", roles: vec!["groupAdmin"] },
        User { name: "dave", groups: vec!["sales"], org: "acme", roles: vec!["orgAdmin"] },
        User { name: "erin", groups: vec![], org: "globex", roles: vec!["superAdmin"] },
        User { name: "frank", groups: vec![], org: "globex", roles: vec!["guest"] },
    ];

    for user in &users {
        let outcome = match gallery.get_image(user, "img-1")? {
            Some(_) => "granted",
            None => "denied",
        };
        println!("  {:<6} {:<12} -> {}", user.name, user.roles.join(","), outcome);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
