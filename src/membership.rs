//! Project membership and access evaluation
//!
//! Role checks run in the same process as the mutation: this is a
//! trust-the-client policy, not an authorization boundary. If this logic is
//! ever lifted into a networked service, the checks must be re-anchored on
//! the server side.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::model::{JoinRequest, Privacy, Project, ProjectMember, ProjectRole, User};

/// Look up a user's role in a project. Absence means no role.
pub fn role_of(project: &Project, user_id: &str) -> Option<ProjectRole> {
    project
        .members
        .iter()
        .find(|member| member.user_id == user_id)
        .map(|member| member.role)
}

pub fn is_member(project: &Project, user_id: &str) -> bool {
    role_of(project, user_id).is_some()
}

/// Gate for admin-only mutations: rename, privacy change, role edits, member
/// removal, request approval/denial, project deletion.
pub fn require_admin(project: &Project, user_id: &str) -> Result<()> {
    match role_of(project, user_id) {
        Some(ProjectRole::Admin) => Ok(()),
        _ => Err(Error::NotAnAdmin {
            project: project.id.clone(),
            user: user_id.to_string(),
        }),
    }
}

/// File a join request for a non-member.
///
/// At most one pending request per (project, user): members and users with a
/// pending request are rejected, so duplicate suppression is a store
/// invariant rather than a UI affordance.
pub fn request_join(project: &mut Project, user_id: &str) -> Result<()> {
    if is_member(project, user_id) {
        return Err(Error::AlreadyMember {
            project: project.id.clone(),
            user: user_id.to_string(),
        });
    }
    if project
        .join_requests
        .iter()
        .any(|request| request.user_id == user_id)
    {
        return Err(Error::JoinRequestPending {
            project: project.id.clone(),
            user: user_id.to_string(),
        });
    }
    project.join_requests.push(JoinRequest {
        user_id: user_id.to_string(),
        requested_at: Utc::now(),
    });
    Ok(())
}

/// Approve a pending request: remove it and append the user as Member.
pub fn approve_request(project: &mut Project, user_id: &str) -> Result<()> {
    remove_request(project, user_id)?;
    project.members.push(ProjectMember {
        user_id: user_id.to_string(),
        role: ProjectRole::Member,
    });
    Ok(())
}

/// Deny a pending request: remove it without adding membership.
pub fn deny_request(project: &mut Project, user_id: &str) -> Result<()> {
    remove_request(project, user_id)
}

fn remove_request(project: &mut Project, user_id: &str) -> Result<()> {
    let before = project.join_requests.len();
    project
        .join_requests
        .retain(|request| request.user_id != user_id);
    if project.join_requests.len() == before {
        return Err(Error::InvalidArgument(format!(
            "no pending join request from {} for project {}",
            user_id, project.id
        )));
    }
    Ok(())
}

/// Projects a user could ask to join: everything they are not a member of.
/// Restricted projects are listed too; their tasks stay hidden until the
/// user is admitted.
pub fn joinable_projects<'a>(projects: &'a [Project], user_id: &str) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| !is_member(project, user_id))
        .collect()
}

/// Users a task spanning `project_ids` may be assigned to.
///
/// When every referenced project is public (or none resolve), assignment is
/// open to all users; otherwise it is the union of the projects' members.
pub fn assignable_users<'a>(
    users: &'a [User],
    projects: &[Project],
    project_ids: &[String],
) -> Vec<&'a User> {
    let relevant: Vec<&Project> = projects
        .iter()
        .filter(|project| project_ids.iter().any(|id| id == &project.id))
        .collect();

    if relevant.is_empty()
        || relevant
            .iter()
            .all(|project| project.privacy == Privacy::Public)
    {
        return users.iter().collect();
    }

    users
        .iter()
        .filter(|user| {
            relevant
                .iter()
                .any(|project| is_member(project, &user.id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, privacy: Privacy, members: &[(&str, ProjectRole)]) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {id}"),
            privacy,
            members: members
                .iter()
                .map(|(user_id, role)| ProjectMember {
                    user_id: user_id.to_string(),
                    role: *role,
                })
                .collect(),
            join_requests: Vec::new(),
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            email: format!("{id}@example.com"),
        }
    }

    #[test]
    fn role_lookup() {
        let p = project(
            "p1",
            Privacy::Restricted,
            &[("u1", ProjectRole::Admin), ("u2", ProjectRole::Member)],
        );
        assert_eq!(role_of(&p, "u1"), Some(ProjectRole::Admin));
        assert_eq!(role_of(&p, "u2"), Some(ProjectRole::Member));
        assert_eq!(role_of(&p, "u3"), None);
    }

    #[test]
    fn admin_gate() {
        let p = project(
            "p1",
            Privacy::Restricted,
            &[("u1", ProjectRole::Admin), ("u2", ProjectRole::Member)],
        );
        assert!(require_admin(&p, "u1").is_ok());
        assert!(matches!(
            require_admin(&p, "u2"),
            Err(Error::NotAnAdmin { .. })
        ));
        assert!(matches!(
            require_admin(&p, "u3"),
            Err(Error::NotAnAdmin { .. })
        ));
    }

    #[test]
    fn duplicate_join_request_rejected() {
        let mut p = project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)]);
        request_join(&mut p, "u2").expect("first request");
        let err = request_join(&mut p, "u2").expect_err("duplicate request");
        assert!(matches!(err, Error::JoinRequestPending { .. }));
        assert_eq!(p.join_requests.len(), 1);
    }

    #[test]
    fn member_join_request_rejected() {
        let mut p = project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)]);
        let err = request_join(&mut p, "u1").expect_err("member request");
        assert!(matches!(err, Error::AlreadyMember { .. }));
    }

    #[test]
    fn approve_adds_exactly_one_member_entry() {
        let mut p = project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)]);
        request_join(&mut p, "u2").expect("request");
        approve_request(&mut p, "u2").expect("approve");

        assert!(p.join_requests.is_empty());
        let entries: Vec<&ProjectMember> = p
            .members
            .iter()
            .filter(|member| member.user_id == "u2")
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, ProjectRole::Member);
    }

    #[test]
    fn deny_removes_without_membership() {
        let mut p = project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)]);
        request_join(&mut p, "u2").expect("request");
        deny_request(&mut p, "u2").expect("deny");

        assert!(p.join_requests.is_empty());
        assert!(!is_member(&p, "u2"));
    }

    #[test]
    fn deny_without_request_is_an_error() {
        let mut p = project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)]);
        assert!(deny_request(&mut p, "u2").is_err());
    }

    #[test]
    fn joinable_lists_non_member_projects() {
        let projects = vec![
            project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)]),
            project("p2", Privacy::Public, &[("u2", ProjectRole::Admin)]),
        ];
        let joinable: Vec<&str> = joinable_projects(&projects, "u1")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(joinable, vec!["p2"]);
    }

    #[test]
    fn assignable_open_for_public_projects() {
        let users = vec![user("u1"), user("u2"), user("u3")];
        let projects = vec![project("p1", Privacy::Public, &[("u1", ProjectRole::Admin)])];
        let assignable = assignable_users(&users, &projects, &["p1".to_string()]);
        assert_eq!(assignable.len(), 3);
    }

    #[test]
    fn assignable_restricted_to_member_union() {
        let users = vec![user("u1"), user("u2"), user("u3")];
        let projects = vec![
            project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)]),
            project("p2", Privacy::Restricted, &[("u2", ProjectRole::Admin)]),
        ];
        let assignable: Vec<&str> = assignable_users(
            &users,
            &projects,
            &["p1".to_string(), "p2".to_string()],
        )
        .iter()
        .map(|u| u.id.as_str())
        .collect();
        assert_eq!(assignable, vec!["u1", "u2"]);
    }

    #[test]
    fn assignable_open_when_no_project_resolves() {
        let users = vec![user("u1"), user("u2")];
        let projects = vec![project("p1", Privacy::Restricted, &[("u1", ProjectRole::Admin)])];
        let assignable = assignable_users(&users, &projects, &["ghost".to_string()]);
        assert_eq!(assignable.len(), 2);
    }
}
