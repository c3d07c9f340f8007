#[macro_export]
/// Make a GET request through a `BeaconClient` and decode the JSON body.
/// if JSON deser fails, emit a `WARN` level tracing event
macro_rules! json_get {
    ($client:expr, $path:expr, $expected:ty) => {
        $crate::json_get!($client, $path, $expected, &[])
    };
    ($client:expr, $path:expr, $expected:ty, $query:expr) => {{
        let path = $path;
        let path: &str = path.as_ref();
        let body = $client.execute(path, $query).await?;

        match serde_json::from_slice::<$expected>(&body) {
            Err(e) => {
                tracing::warn!(
                    method = "GET",
                    path = path,
                    response = %String::from_utf8_lossy(&body),
                    "Unexpected response from server"
                );

                Err($crate::clients::common::ClientError::from(e))
            }
            Ok(response) => Ok(response),
        }
    }};
}
