pub fn cluster_route() -> &'static str {
    "/api/v1/cluster"
}

pub fn node_route_prefix() -> &'static str {
    "/api/v1/node"
}
