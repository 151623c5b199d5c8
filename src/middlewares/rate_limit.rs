/*!
 * 速率限制中间件
 *
 * 固定窗口计数：同一个键在 `window_secs` 内最多放行 `max_requests` 次，
 * 超出后返回 429，`Retry-After` 为当前窗口剩余秒数。窗口从该键的第一次
 * 请求开始计时，后续请求不会延长窗口。预设的窗口和上限来自 `[rate_limit]`
 * 配置段，`RateLimit::new` 创建的实例使用自己的窗口。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * 键优先使用已认证用户 ID，否则使用客户端 IP。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::Expiry;
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

// 单调时钟的起点，窗口时间都以它为基准换算成秒
static CLOCK_START: Lazy<Instant> = Lazy::new(Instant::now);

fn now_secs() -> u64 {
    CLOCK_START.elapsed().as_secs()
}

/// 一个键的当前窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    started_at: u64,
    count: u32,
    window_secs: u64,
}

impl Window {
    /// 记一次请求；窗口已过期则从 `now` 开新窗口
    fn hit(prev: Option<Window>, now: u64, window_secs: u64) -> Self {
        match prev {
            Some(w) if now < w.started_at.saturating_add(w.window_secs) => Self {
                count: w.count.saturating_add(1),
                ..w
            },
            _ => Self {
                started_at: now,
                count: 1,
                window_secs,
            },
        }
    }

    fn retry_after(&self, now: u64) -> u64 {
        self.started_at
            .saturating_add(self.window_secs)
            .saturating_sub(now)
            .max(1)
    }
}

// 条目寿命跟随窗口：新窗口给满时长，窗口内的更新保留剩余时长
struct WindowExpiry;

impl Expiry<String, Window> for WindowExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Window,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Duration::from_secs(value.window_secs))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Window,
        _updated_at: Instant,
        duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        if value.count == 1 {
            Some(Duration::from_secs(value.window_secs))
        } else {
            duration_until_expiry
        }
    }
}

// 键: 前缀:标识
static COUNTERS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .expire_after(WindowExpiry)
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    enabled: bool,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            enabled: true,
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    fn from_config(max_requests: u32, prefix: &str) -> Self {
        let config = &AppConfig::get().rate_limit;
        Self {
            enabled: config.enabled,
            ..Self::new(max_requests, config.window_secs).with_prefix(prefix)
        }
    }

    /// 登录：按 IP 计数
    pub fn login() -> Self {
        Self::from_config(AppConfig::get().rate_limit.login_max_requests, "login")
    }

    /// 注册：按 IP 计数
    pub fn register() -> Self {
        Self::from_config(
            AppConfig::get().rate_limit.register_max_requests,
            "register",
        )
    }

    /// 在 `now` 时刻为 `key` 记一次请求，超限时返回需要等待的秒数
    async fn check(&self, key: String, now: u64) -> Result<(), u64> {
        let window_secs = self.window_secs.max(1);
        // 同一个键的读改写由 moka 串行化
        let window = COUNTERS
            .entry(key)
            .and_upsert_with(|entry| {
                let prev = entry.map(|e| e.into_value());
                std::future::ready(Window::hit(prev, now, window_secs))
            })
            .await
            .into_value();

        if window.count > self.max_requests {
            Err(window.retry_after(now))
        } else {
            Ok(())
        }
    }

    fn cache_key(&self, identifier: &str) -> String {
        if self.key_prefix.is_empty() {
            identifier.to_string()
        } else {
            format!("{}:{}", self.key_prefix, identifier)
        }
    }
}

/// 客户端 IP，连接信息优先，其次 X-Forwarded-For 的第一段
fn client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next().map(str::trim)
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn rate_limited_response(retry_after: u64) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: Rc::new(self.clone()),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: Rc<RateLimit>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            if !limit.enabled {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let user_id = req.extensions().get::<User>().map(|user| user.id);
            let identifier = match user_id {
                Some(id) => format!("user:{id}"),
                None => format!("ip:{}", client_ip(&req)),
            };
            let key = limit.cache_key(&identifier);

            if let Err(retry_after) = limit.check(key.clone(), now_secs()).await {
                warn!(
                    "Rate limit exceeded for {} (max {} per {}s)",
                    key, limit.max_requests, limit.window_secs
                );
                return Ok(req.into_response(
                    rate_limited_response(retry_after).map_into_right_body(),
                ));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_follow_config() {
        let config = &AppConfig::get().rate_limit;

        let login = RateLimit::login();
        assert_eq!(login.max_requests, config.login_max_requests);
        assert_eq!(login.window_secs, config.window_secs);
        assert_eq!(login.key_prefix, "login");
        assert_eq!(login.enabled, config.enabled);

        let register = RateLimit::register();
        assert_eq!(register.max_requests, config.register_max_requests);
        assert_eq!(register.key_prefix, "register");
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(RateLimit::new(1, 60).cache_key("ip:1.2.3.4"), "ip:1.2.3.4");
        assert_eq!(
            RateLimit::new(1, 60)
                .with_prefix("login")
                .cache_key("ip:1.2.3.4"),
            "login:ip:1.2.3.4"
        );
    }

    #[tokio::test]
    async fn test_window_does_not_slide() {
        let limit = RateLimit::new(2, 60).with_prefix("fixed-window");
        let key = limit.cache_key("ip:10.0.0.1");

        assert_eq!(limit.check(key.clone(), 0).await, Ok(()));
        assert_eq!(limit.check(key.clone(), 50).await, Ok(()));
        assert_eq!(limit.check(key.clone(), 55).await, Err(5));

        // 窗口从 t=0 起算，t=65 已是新窗口
        assert_eq!(limit.check(key.clone(), 65).await, Ok(()));
        assert_eq!(limit.check(key.clone(), 70).await, Ok(()));
        assert_eq!(limit.check(key.clone(), 71).await, Err(54));
    }

    #[tokio::test]
    async fn test_keys_are_counted_separately() {
        let limit = RateLimit::new(1, 60).with_prefix("separate-keys");

        assert_eq!(limit.check(limit.cache_key("ip:10.0.0.1"), 0).await, Ok(()));
        assert!(limit.check(limit.cache_key("ip:10.0.0.1"), 1).await.is_err());
        assert_eq!(limit.check(limit.cache_key("ip:10.0.0.2"), 1).await, Ok(()));
    }

    #[tokio::test]
    async fn test_window_length_is_per_instance() {
        let short = RateLimit::new(1, 5).with_prefix("short-window");
        let key = short.cache_key("ip:10.0.0.1");

        assert_eq!(short.check(key.clone(), 0).await, Ok(()));
        assert_eq!(short.check(key.clone(), 4).await, Err(1));
        assert_eq!(short.check(key.clone(), 5).await, Ok(()));
    }

    #[test]
    fn test_window_hit() {
        let w = Window::hit(None, 10, 60);
        assert_eq!((w.started_at, w.count), (10, 1));

        let w = Window::hit(Some(w), 69, 60);
        assert_eq!((w.started_at, w.count), (10, 2));
        assert_eq!(w.retry_after(69), 1);

        let w = Window::hit(Some(w), 70, 60);
        assert_eq!((w.started_at, w.count), (70, 1));
    }
}
