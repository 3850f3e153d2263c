use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use pkg_constants::api::{
    APP_NAME_LABEL, APPLY_PATCH_CONTENT_TYPE, FIELD_MANAGER, HPA_KIND, SCALED_OBJECT_KIND,
    SECRET_KIND, SPINAPP_KIND, SPINAPP_RESOURCE,
};
use pkg_types::manifest::Document;
use pkg_types::meta::List;
use pkg_types::pod::Pod;
use pkg_types::spinapp::SpinApp;
use pkg_types::validate::validate_name;
use reqwest::{Method, RequestBuilder, Response};
use std::io::Write;
use tracing::{debug, info};

use crate::apply::ManifestApplier;

/// Connection settings after merging flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server: String,
    pub token: Option<String>,
    pub insecure_skip_tls_verify: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub follow: bool,
    pub tail_lines: Option<i64>,
}

/// Client for the Kubernetes API server.
#[derive(Clone)]
pub struct ClusterClient {
    http: reqwest::Client,
    server: String,
    token: Option<String>,
}

/// API path of the object `document` describes, within `namespace`.
pub fn resource_path(namespace: &str, document: &Document) -> Result<String> {
    validate_name(namespace)?;
    let (prefix, plural) = match document.kind() {
        SPINAPP_KIND => ("apis", SPINAPP_RESOURCE),
        SECRET_KIND => ("api", "secrets"),
        HPA_KIND => ("apis", "horizontalpodautoscalers"),
        SCALED_OBJECT_KIND => ("apis", "scaledobjects"),
        other => bail!("unsupported kind '{}'", other),
    };
    Ok(format!(
        "/{}/{}/namespaces/{}/{}/{}",
        prefix,
        document.api_version(),
        namespace,
        plural,
        document.name()
    ))
}

fn spinapps_path(namespace: &str) -> Result<String> {
    validate_name(namespace)?;
    Ok(format!(
        "/apis/{}/namespaces/{}/{}",
        pkg_constants::api::SPINAPP_API_VERSION,
        namespace,
        SPINAPP_RESOURCE
    ))
}

impl ClusterClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
            .build()?;
        Ok(Self {
            http,
            server: config.server.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.server, path);
        debug!("{} {}", method, url);
        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    /// Fail with the server's message unless the response is 2xx.
    async fn check(resp: Response, what: &str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        bail!("server returned {} for {}: {}", status, what, body.trim())
    }

    pub async fn get_spinapp(&self, namespace: &str, name: &str) -> Result<SpinApp> {
        validate_name(name)?;
        let path = format!("{}/{}", spinapps_path(namespace)?, name);
        let resp = self.request(Method::GET, &path).send().await?;
        let resp = Self::check(resp, &format!("spinapp {}/{}", namespace, name)).await?;
        Ok(resp.json().await?)
    }

    pub async fn list_spinapps(&self, namespace: &str) -> Result<Vec<SpinApp>> {
        let resp = self
            .request(Method::GET, &spinapps_path(namespace)?)
            .send()
            .await?;
        let resp = Self::check(resp, &format!("spinapps in {}", namespace)).await?;
        let list: List<SpinApp> = resp.json().await?;
        Ok(list.items)
    }

    /// Stream the logs of one of the app's pods into `out`.
    pub async fn logs<W: Write>(
        &self,
        namespace: &str,
        name: &str,
        opts: &LogOptions,
        out: &mut W,
    ) -> Result<()> {
        validate_name(name)?;
        let pod = self.pick_pod(namespace, name).await?;
        info!("Showing logs for pod {}", pod);

        let mut path = format!(
            "/api/v1/namespaces/{}/pods/{}/log?follow={}",
            namespace, pod, opts.follow
        );
        if let Some(tail) = opts.tail_lines {
            path.push_str(&format!("&tailLines={}", tail));
        }

        let resp = self.request(Method::GET, &path).send().await?;
        let mut resp = Self::check(resp, &format!("logs of pod {}", pod)).await?;
        while let Some(chunk) = resp.chunk().await? {
            out.write_all(&chunk)?;
            out.flush()?;
        }
        Ok(())
    }

    /// First pod of the app by name, preferring running ones.
    async fn pick_pod(&self, namespace: &str, name: &str) -> Result<String> {
        validate_name(namespace)?;
        // `<label>=<name>`, URL-encoded
        let selector = format!("{}%3D{}", APP_NAME_LABEL.replace('/', "%2F"), name);
        let path = format!(
            "/api/v1/namespaces/{}/pods?labelSelector={}",
            namespace, selector
        );
        let resp = self.request(Method::GET, &path).send().await?;
        let resp = Self::check(resp, &format!("pods of {}", name)).await?;
        let list: List<Pod> = resp.json().await?;

        let mut pods = list.items;
        pods.sort_by(|a, b| {
            let running = |p: &Pod| p.status.phase.as_deref() == Some("Running");
            running(b)
                .cmp(&running(a))
                .then_with(|| a.metadata.name.cmp(&b.metadata.name))
        });
        match pods.into_iter().next() {
            Some(pod) => Ok(pod.metadata.name),
            None => bail!("no pods found for app '{}' in namespace {}", name, namespace),
        }
    }
}

#[async_trait]
impl ManifestApplier for ClusterClient {
    /// Server-side apply of `document` into `namespace`.
    async fn apply(&self, namespace: &str, document: &Document) -> Result<()> {
        let mut document = document.clone();
        document.metadata_mut().namespace = Some(namespace.to_string());

        let path = format!(
            "{}?fieldManager={}&force=true",
            resource_path(namespace, &document)?,
            FIELD_MANAGER
        );
        // JSON is valid YAML, so the apply-patch content type accepts it.
        let body = serde_json::to_vec(&document)?;
        let resp = self
            .request(Method::PATCH, &path)
            .header("Content-Type", APPLY_PATCH_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.server))?;
        Self::check(resp, &document.display_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::hpa::{CrossVersionObjectReference, HPASpec, HorizontalPodAutoscaler};
    use pkg_types::keda::{ScaleTargetRef, ScaledObject, ScaledObjectSpec};
    use pkg_types::meta::ObjectMeta;
    use pkg_types::secret::Secret;
    use pkg_types::spinapp::SpinAppSpec;
    use std::collections::BTreeMap;

    fn meta(name: &str) -> ObjectMeta {
        ObjectMeta::named(name, None)
    }

    #[test]
    fn maps_documents_to_api_paths() {
        let app = Document::SpinApp(SpinApp::new(meta("hello"), SpinAppSpec::default()));
        assert_eq!(
            resource_path("apps", &app).unwrap(),
            "/apis/core.spinoperator.dev/v1alpha1/namespaces/apps/spinapps/hello"
        );

        let secret = Document::Secret(Secret::opaque(meta("hello-runtime-config"), BTreeMap::new()));
        assert_eq!(
            resource_path("apps", &secret).unwrap(),
            "/api/v1/namespaces/apps/secrets/hello-runtime-config"
        );

        let hpa = Document::HorizontalPodAutoscaler(HorizontalPodAutoscaler::new(
            meta("hello-autoscaler"),
            HPASpec {
                scale_target_ref: CrossVersionObjectReference {
                    api_version: "apps/v1".to_string(),
                    kind: "Deployment".to_string(),
                    name: "hello".to_string(),
                },
                min_replicas: 1,
                max_replicas: 2,
                metrics: vec![],
            },
        ));
        assert_eq!(
            resource_path("default", &hpa).unwrap(),
            "/apis/autoscaling/v2/namespaces/default/horizontalpodautoscalers/hello-autoscaler"
        );

        let so = Document::ScaledObject(ScaledObject::new(
            meta("hello-autoscaler"),
            ScaledObjectSpec {
                scale_target_ref: ScaleTargetRef {
                    name: "hello".to_string(),
                },
                min_replica_count: 1,
                max_replica_count: 2,
                triggers: vec![],
            },
        ));
        assert_eq!(
            resource_path("default", &so).unwrap(),
            "/apis/keda.sh/v1alpha1/namespaces/default/scaledobjects/hello-autoscaler"
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut app = SpinApp::new(meta("hello"), SpinAppSpec::default());
        app.kind = "ConfigMap".to_string();
        assert!(resource_path("default", &Document::SpinApp(app)).is_err());
    }

    #[test]
    fn trims_trailing_slash_from_server() {
        let client = ClusterClient::new(&ClientConfig {
            server: "https://10.0.0.1:6443/".to_string(),
            token: None,
            insecure_skip_tls_verify: false,
        })
        .unwrap();
        assert_eq!(client.server, "https://10.0.0.1:6443");
    }

    #[tokio::test]
    async fn rejects_bad_names_before_any_request() {
        let client = ClusterClient::new(&ClientConfig {
            server: "http://127.0.0.1:1".to_string(),
            token: None,
            insecure_skip_tls_verify: false,
        })
        .unwrap();
        let err = client.get_spinapp("default", "Hello").await.unwrap_err();
        assert!(err.to_string().contains("must contain only"));
    }

    #[tokio::test]
    async fn rejects_bad_namespaces_before_any_request() {
        let client = ClusterClient::new(&ClientConfig {
            server: "http://127.0.0.1:1".to_string(),
            token: None,
            insecure_skip_tls_verify: false,
        })
        .unwrap();

        let err = client.get_spinapp("kube-system/../x", "hello").await.unwrap_err();
        assert!(err.to_string().contains("must contain only"));
        let err = client.list_spinapps("a?b").await.unwrap_err();
        assert!(err.to_string().contains("must contain only"));
        let err = client
            .logs("a#b", "hello", &LogOptions::default(), &mut Vec::<u8>::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must contain only"));

        let app = Document::SpinApp(SpinApp::new(meta("hello"), SpinAppSpec::default()));
        assert!(resource_path("../secrets", &app).is_err());
    }
}
