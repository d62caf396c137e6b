use serde::{Deserialize, Serialize};

use crate::models::{Project, Task, User};

/// A project together with its tasks.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// Everything a user owns, as returned by `GET /api/all`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserOverview {
    #[serde(flatten)]
    pub user: User,
    pub projects: Vec<ProjectWithTasks>,
}

impl UserOverview {
    /// Groups `tasks` under their projects. Tasks whose project is not in `projects`
    /// are dropped.
    pub fn assemble(user: User, projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        let mut projects: Vec<ProjectWithTasks> = projects
            .into_iter()
            .map(|project| ProjectWithTasks {
                project,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks {
            if let Some(entry) = projects
                .iter_mut()
                .find(|entry| entry.project.id == task.project_id)
            {
                entry.tasks.push(task);
            }
        }

        Self { user, projects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn project(id: i32) -> Project {
        Project {
            id,
            name: format!("project {}", id),
            description: None,
            user_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(id: i32, project_id: i32) -> Task {
        Task {
            id,
            name: format!("task {}", id),
            description: None,
            completion: 0.0,
            project_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user() -> User {
        User {
            id: 1,
            name: "owner".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_assemble_groups_tasks_by_project() {
        let overview = UserOverview::assemble(
            user(),
            vec![project(10), project(20)],
            vec![task(1, 10), task(2, 20), task(3, 10), task(4, 99)],
        );

        let grouped: Vec<(i32, Vec<i32>)> = overview
            .projects
            .iter()
            .map(|p| (p.project.id, p.tasks.iter().map(|t| t.id).collect()))
            .collect();
        assert_eq!(grouped, vec![(10, vec![1, 3]), (20, vec![2])]);
    }

    #[test]
    fn test_overview_json_shape() {
        let overview = UserOverview::assemble(user(), vec![project(10)], vec![task(1, 10)]);
        let json = serde_json::to_value(&overview).unwrap();

        assert_eq!(json["name"], "owner");
        assert_eq!(json["projects"][0]["id"], 10);
        assert_eq!(json["projects"][0]["tasks"][0]["name"], "task 1");
        assert!(json.get("password_hash").is_none());
    }
}
