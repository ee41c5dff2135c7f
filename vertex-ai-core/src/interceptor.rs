//! # Interceptors
//!
//! Pre/post hooks registered per RPC, keyed by the RPC's fully qualified
//! name. A pre hook observes the canonical request and the outbound metadata
//! before the transport is invoked and may mutate either; a post hook
//! observes the response and may replace it in place.
//!
//! Hooks are type-erased through `dyn Any`; a hook downcasts to the concrete
//! request or response type it was registered for. Errors never pass through
//! the registry, so a hook cannot swallow them.

use crate::options::Metadata;
use crate::rpc::RpcDescriptor;
use std::any::Any;
use std::collections::HashMap;

type PreHook = Box<dyn Fn(&mut dyn Any, &mut Metadata) + Send + Sync>;
type PostHook = Box<dyn Fn(&mut dyn Any) + Send + Sync>;

/// Registry of per-RPC hooks.
#[derive(Default)]
pub struct InterceptorRegistry {
    pre: HashMap<String, PreHook>,
    post: HashMap<String, PostHook>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pre-call hook for `rpc`, replacing any previous one.
    pub fn on_request<F>(&mut self, rpc: &RpcDescriptor, hook: F)
    where
        F: Fn(&mut dyn Any, &mut Metadata) + Send + Sync + 'static,
    {
        self.pre.insert(rpc.full_name(), Box::new(hook));
    }

    /// Registers a post-call hook for `rpc`, replacing any previous one.
    pub fn on_response<F>(&mut self, rpc: &RpcDescriptor, hook: F)
    where
        F: Fn(&mut dyn Any) + Send + Sync + 'static,
    {
        self.post.insert(rpc.full_name(), Box::new(hook));
    }

    pub(crate) fn run_pre(&self, rpc: &RpcDescriptor, request: &mut dyn Any, metadata: &mut Metadata) {
        if let Some(hook) = self.pre.get(&rpc.full_name()) {
            hook(request, metadata);
        }
    }

    pub(crate) fn run_post(&self, rpc: &RpcDescriptor, response: &mut dyn Any) {
        if let Some(hook) = self.post.get(&rpc.full_name()) {
            hook(response);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }
}

impl std::fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorRegistry")
            .field("pre", &self.pre.keys().collect::<Vec<_>>())
            .field("post", &self.post.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RPC: RpcDescriptor = RpcDescriptor {
        service: "google.cloud.aiplatform.v1.JobService",
        method: "GetCustomJob",
        routing_field: Some("name"),
        http: None,
        default_timeout_ms: None,
    };

    #[test]
    fn pre_hook_mutates_request_and_metadata() {
        let mut registry = InterceptorRegistry::new();
        registry.on_request(&RPC, |request, metadata| {
            if let Some(name) = request.downcast_mut::<String>() {
                name.push_str("/suffix");
            }
            metadata.push(("x-observed".into(), "1".into()));
        });

        let mut request = "projects/p".to_string();
        let mut metadata = Metadata::new();
        registry.run_pre(&RPC, &mut request, &mut metadata);

        assert_eq!(request, "projects/p/suffix");
        assert_eq!(metadata, vec![("x-observed".into(), "1".into())]);
    }

    #[test]
    fn post_hook_substitutes_the_response() {
        let mut registry = InterceptorRegistry::new();
        registry.on_response(&RPC, |response| {
            if let Some(value) = response.downcast_mut::<u32>() {
                *value = 42;
            }
        });

        let mut response = 7u32;
        registry.run_post(&RPC, &mut response);
        assert_eq!(response, 42);
    }

    #[test]
    fn hooks_only_fire_for_their_rpc() {
        let other = RpcDescriptor {
            method: "ListCustomJobs",
            ..RPC
        };
        let mut registry = InterceptorRegistry::new();
        registry.on_request(&RPC, |_, metadata| {
            metadata.push(("x-hit".into(), "1".into()));
        });

        let mut metadata = Metadata::new();
        registry.run_pre(&other, &mut 0u32, &mut metadata);
        assert!(metadata.is_empty());
    }
}
