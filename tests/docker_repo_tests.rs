// Optional DockerRepo tests when Docker daemon is available

use dockstatus::docker_repo::{ContainerRuntime, DockerRepo, docker_status};
use dockstatus::models::count_running;
use std::time::Duration;

#[tokio::test]
async fn docker_repo_connect_and_list() {
    let repo = match DockerRepo::connect(Duration::from_secs(5)) {
        Ok(r) => r,
        Err(_) => return, // Skip when Docker is not available (e.g. CI without Docker)
    };
    let all = match repo.list_all().await {
        Ok(all) => all,
        Err(_) => return, // Client built but no daemon behind the socket
    };
    assert!(count_running(&all) <= all.len());
    assert!(all.iter().all(|c| c.contains_key("Id")));

    let status = docker_status(&repo).await;
    assert_eq!(status.container_count, status.containers.len());
}
