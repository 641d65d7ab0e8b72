use crate::{
    Guest, GuestStatus, GuestType, ProxmoxClient, ProxmoxError, tests::create_test_client,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_guests(
    mock_server: &MockServer,
    node: &str,
    qemu: serde_json::Value,
    lxc: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("/api2/json/nodes/{}/qemu", node)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": qemu})))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api2/json/nodes/{}/lxc", node)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": lxc})))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_guests_merged_and_sorted() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    mount_guests(
        &mock_server,
        "pve1",
        serde_json::json!([{"vmid": 100, "name": "web", "status": "running"}]),
        serde_json::json!([{"vmid": 50, "name": "", "status": "stopped"}]),
    )
    .await;

    let guests = client.guests("pve1").await.unwrap();
    assert_eq!(
        guests,
        vec![
            Guest {
                id: 50,
                name: "VM 50".to_string(),
                status: GuestStatus::Stopped,
                guest_type: GuestType::Lxc,
                node: "pve1".to_string(),
            },
            Guest {
                id: 100,
                name: "web".to_string(),
                status: GuestStatus::Running,
                guest_type: GuestType::Qemu,
                node: "pve1".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_guests_count_is_sum_of_both_collections() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    mount_guests(
        &mock_server,
        "pve1",
        serde_json::json!([
            {"vmid": 300, "name": "db", "status": "running", "maxmem": 8589934592_i64},
            {"vmid": 101, "name": "ci-runner", "status": "paused"},
            {"vmid": 205, "name": "mail", "status": "stopped"}
        ]),
        serde_json::json!([
            {"vmid": "204", "name": "dns", "status": "running", "type": "lxc"},
            {"vmid": 101, "name": "proxy", "status": "running"}
        ]),
    )
    .await;

    let guests = client.guests("pve1").await.unwrap();
    assert_eq!(guests.len(), 5);
    assert!(guests.windows(2).all(|pair| pair[0].id <= pair[1].id));

    let ids: Vec<u32> = guests.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![101, 101, 204, 205, 300]);

    // Equal ids keep their fetch order: VMs before containers.
    assert_eq!(guests[0].guest_type, GuestType::Qemu);
    assert_eq!(guests[0].status, GuestStatus::Unknown);
    assert_eq!(guests[1].guest_type, GuestType::Lxc);
    assert_eq!(guests[2].name, "dns");
    assert!(guests.iter().all(|g| g.node == "pve1"));
}

#[tokio::test]
async fn test_guests_fail_when_container_listing_fails() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"vmid": 100, "name": "web", "status": "running"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/lxc"))
        .respond_with(ResponseTemplate::new(500).set_body_string("lxc listing failed"))
        .mount(&mock_server)
        .await;

    let result = client.guests("pve1").await;
    assert!(matches!(result, Err(ProxmoxError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_guests_fail_when_vm_listing_fails() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/lxc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"vmid": 50, "name": "dns", "status": "running"}]
        })))
        .mount(&mock_server)
        .await;

    let result = client.guests("pve1").await;
    assert!(matches!(result, Err(ProxmoxError::Decode(_))));
}

#[tokio::test]
async fn test_guests_node_name_is_percent_encoded() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    mount_guests(
        &mock_server,
        "lab%20node",
        serde_json::json!([{"vmid": 100, "name": "web", "status": "running"}]),
        serde_json::json!([]),
    )
    .await;

    let guests = client.guests("lab node").await.unwrap();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0].node, "lab node");
}

#[tokio::test]
async fn test_guest_detail_success() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/100/status/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "status": "running",
                "name": "ubuntu-vm",
                "cpu": 0.15,
                "mem": 4294967296_i64,
                "maxmem": 8589934592_i64,
                "uptime": 123456,
                "qmpstatus": "running",
                "vmid": 100
            }
        })))
        .mount(&mock_server)
        .await;

    let detail = client
        .guest_detail("pve1", GuestType::Qemu, 100)
        .await
        .unwrap();
    assert_eq!(detail.id, 100);
    assert_eq!(detail.name, "ubuntu-vm");
    assert_eq!(detail.status, "running");
    assert_eq!(detail.status_kind(), GuestStatus::Running);
    assert_eq!(detail.guest_type, GuestType::Qemu);
    assert_eq!(detail.node, "pve1");
    assert_eq!(detail.cpu, 0.15);
    assert_eq!(detail.mem, 4294967296);
    assert_eq!(detail.max_mem, 8589934592);
    assert_eq!(detail.uptime, 123456);
}

#[tokio::test]
async fn test_guest_detail_minimal() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/lxc/200/status/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"status": "suspended"}
        })))
        .mount(&mock_server)
        .await;

    let detail = client
        .guest_detail("pve1", GuestType::Lxc, 200)
        .await
        .unwrap();
    assert_eq!(detail.name, "VM 200");
    assert_eq!(detail.status, "suspended");
    assert_eq!(detail.status_kind(), GuestStatus::Unknown);
    assert_eq!(detail.uptime, 0);
    assert_eq!(detail.cpu, 0.0);
    assert_eq!(detail.mem, 0);
    assert_eq!(detail.max_mem, 0);
}

#[tokio::test]
async fn test_guest_detail_not_found() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/999/status/current"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            "Configuration file 'nodes/pve1/qemu-server/999.conf' does not exist",
        ))
        .mount(&mock_server)
        .await;

    let error = client
        .guest_detail("pve1", GuestType::Qemu, 999)
        .await
        .unwrap_err();
    assert!(error.to_string().contains("999.conf"));
}

async fn assert_action(action: &str, guest_type: GuestType) {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path(format!(
            "/api2/json/nodes/pve1/{}/100/status/{}",
            guest_type, action
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": format!("UPID:pve1:00000001:00000001:00000001:{}", action)
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = match action {
        "start" => client.start_guest("pve1", guest_type, 100).await,
        "stop" => client.stop_guest("pve1", guest_type, 100).await,
        "reboot" => client.restart_guest("pve1", guest_type, 100).await,
        other => panic!("unexpected action {}", other),
    };
    assert!(result.is_ok(), "{} {:?}: {:?}", action, guest_type, result);
}

#[tokio::test]
async fn test_lifecycle_actions() {
    for guest_type in GuestType::ALL {
        for action in ["start", "stop", "reboot"] {
            assert_action(action, guest_type).await;
        }
    }
}

#[tokio::test]
async fn test_lifecycle_action_rejected() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/status/start"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission check failed"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let error = client
        .start_guest("pve1", GuestType::Qemu, 100)
        .await
        .unwrap_err();
    assert!(matches!(error, ProxmoxError::Api { status: 403, .. }));
}

#[tokio::test]
async fn test_guests_without_token_never_reach_server() {
    let mock_server = MockServer::start().await;
    let client = ProxmoxClient::new(mock_server.uri(), "", false).unwrap();

    let result = client.guests("pve1").await;
    assert!(matches!(result, Err(ProxmoxError::Configuration(_))));

    let received = mock_server.received_requests().await.unwrap();
    assert!(received.is_empty());
}
