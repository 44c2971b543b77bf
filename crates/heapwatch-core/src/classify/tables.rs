//! Fixed name tables used by the classifier.
//!
//! Membership testing is the only operation performed on these lists;
//! the [`Classifier`](super::Classifier) folds them into hash sets at
//! construction. The split into named tables mirrors where the names
//! come from (language runtime, WebGL, browser, DOM, three.js
//! subsystems, third-party clients) and keeps each list reviewable on
//! its own.

/// Three.js classes reported under the `threejs` constructor bucket.
/// Scene graph nodes, geometries, materials, textures, lights, cameras,
/// audio, animation, and a few core utility classes.
pub const KNOWN_THREEJS_TYPES: &[&str] = &[
    "Scene", "Object3D", "Mesh", "Group", "SkinnedMesh", "InstancedMesh", "BatchedMesh", "LOD",
    "Points", "Line", "LineLoop", "LineSegments", "Sprite",
    "BufferGeometry", "InstancedBufferGeometry", "BoxGeometry", "CapsuleGeometry", "CircleGeometry",
    "ConeGeometry", "CylinderGeometry", "DodecahedronGeometry", "EdgesGeometry", "ExtrudeGeometry",
    "IcosahedronGeometry", "LatheGeometry", "OctahedronGeometry", "PlaneGeometry",
    "PolyhedronGeometry", "RingGeometry", "ShapeGeometry", "SphereGeometry", "TetrahedronGeometry",
    "TorusGeometry", "TorusKnotGeometry", "TubeGeometry", "WireframeGeometry", "Shape", "Path",
    "Material", "LineBasicMaterial", "LineDashedMaterial", "MeshBasicMaterial", "MeshDepthMaterial",
    "MeshDistanceMaterial", "MeshLambertMaterial", "MeshMatcapMaterial", "MeshNormalMaterial",
    "MeshPhongMaterial", "MeshPhysicalMaterial", "MeshStandardMaterial", "MeshToonMaterial",
    "PointsMaterial", "RawShaderMaterial", "ShaderMaterial", "ShadowMaterial", "SpriteMaterial",
    "Texture", "CanvasTexture", "CompressedArrayTexture", "CompressedCubeTexture",
    "CompressedTexture", "CubeTexture", "Data3DTexture", "DataArrayTexture", "DataTexture",
    "DepthTexture", "FramebufferTexture", "VideoTexture",
    "WebGLRenderTarget", "WebGLCubeRenderTarget", "WebGLArrayRenderTarget",
    "Light", "AmbientLight", "DirectionalLight", "HemisphereLight", "LightProbe", "PointLight",
    "RectAreaLight", "SpotLight", "LightShadow", "DirectionalLightShadow", "PointLightShadow",
    "SpotLightShadow",
    "Camera", "ArrayCamera", "OrthographicCamera", "PerspectiveCamera", "StereoCamera",
    "CubeCamera",
    "Audio", "AudioListener", "PositionalAudio",
    "AnimationClip", "AnimationMixer", "AnimationAction", "AnimationObjectGroup", "KeyframeTrack",
    "BooleanKeyframeTrack", "ColorKeyframeTrack", "NumberKeyframeTrack", "QuaternionKeyframeTrack",
    "StringKeyframeTrack", "VectorKeyframeTrack",
    "Raycaster", "Layers", "Clock", "EventDispatcher",
];

/// Standard language/runtime constructors, plus loader-generated
/// internal class names that show up as heap object names.
pub const JS_BUILTINS: &[&str] = &[
    "Object", "Array", "Function", "String", "Number", "Boolean", "Symbol", "Date",
    "Error", "EvalError", "RangeError", "ReferenceError", "SyntaxError", "TypeError", "URIError",
    "RegExp", "Map", "Set", "WeakMap", "WeakSet", "Promise",
    "ArrayBuffer", "SharedArrayBuffer", "DataView", "Atomics", "JSON", "Math", "Reflect",
    "Intl", "Collator", "DateTimeFormat", "ListFormat", "NumberFormat", "PluralRules",
    "RelativeTimeFormat", "Locale",
    "AggregateError", "FinalizationRegistry", "WeakRef", "Iterator", "AsyncIterator",
    "GeneratorFunction", "AsyncFunction", "AsyncGeneratorFunction", "InternalError",
    "SuppressedError", "DisposableStack", "AsyncDisposableStack",
    "CompileError", "LinkError", "RuntimeError", "TypedArray",
    "BigInt", "DisplayNames", "DurationFormat", "Segmenter",
    "GLTFBinaryExtension", "GLTFCubicSplineInterpolant", "GLTFCubicSplineQuaternionInterpolant",
    "GLTFDracoMeshCompressionExtension", "GLTFLightsExtension", "GLTFMaterialsAnisotropyExtension",
    "GLTFMaterialsBumpExtension", "GLTFMaterialsClearcoatExtension",
    "GLTFMaterialsEmissiveStrengthExtension", "GLTFMaterialsIorExtension",
    "GLTFMaterialsIridescenceExtension", "GLTFMaterialsSheenExtension",
    "GLTFMaterialsSpecularExtension", "GLTFMaterialsTransmissionExtension",
    "GLTFMaterialsUnlitExtension", "GLTFMaterialsVolumeExtension", "GLTFMeshGpuInstancing",
    "GLTFMeshQuantizationExtension", "GLTFMeshoptCompression", "GLTFParser", "GLTFRegistry",
    "GLTFTextureAVIFExtension", "GLTFTextureBasisUExtension", "GLTFTextureTransformExtension",
    "GLTFTextureWebPExtension",
];

/// WebGL API objects and three.js renderer internals.
pub const WEBGL_INTERNALS: &[&str] = &[
    "WebGLRenderingContext", "WebGL2RenderingContext", "WebGLActiveInfo", "WebGLBuffer",
    "WebGLContextEvent", "WebGLFramebuffer", "WebGLProgram", "WebGLQuery", "WebGLRenderbuffer",
    "WebGLSampler", "WebGLShader", "WebGLShaderPrecisionFormat", "WebGLSync",
    "WebGLTransformFeedback", "WebGLUniformLocation", "WebGLVertexArrayObject", "WebGLTexture",
    "OESTextureFloatLinear",
    "WebGLAnimation", "WebGLAttributes", "WebGLBackground", "WebGLBindingStates",
    "WebGLBufferRenderer", "WebGLCapabilities", "WebGLClipping", "WebGLCubeMaps",
    "WebGLCubeUVMaps", "WebGLExtensions", "WebGLGeometries", "WebGLIndexedBufferRenderer",
    "WebGLInfo", "WebGLMaterials", "WebGLMorphtargets", "WebGLMultipleRenderTargets",
    "WebGLObject", "WebGLObjects", "WebGLPrograms", "WebGLProperties", "WebGLRenderLists",
    "WebGLRenderStates", "WebGLRenderer", "WebGL1Renderer", "WebGLShaderCache", "WebGLShadowMap",
    "WebGLState", "WebGLTextures", "WebGLUniforms", "WebGLUniformsGroups", "WebGLUtils",
    "Uniform", "SingleUniform", "PureArrayUniform", "StructuredUniform", "UniformsGroup",
    "PropertyBinding", "PropertyMixer", "ImageUtils", "PMREMGenerator", "WebXRManager",
    "WebXRController", "WebGLShaderStage", "WebGLCubeRenderTarget", "WebGLArrayRenderTarget",
    "WebGL3DRenderTarget",
];

/// Browser platform APIs (events, networking, streams, audio, workers).
pub const BROWSER_APIS: &[&str] = &[
    "Window", "Event", "CustomEvent", "UIEvent", "MouseEvent", "KeyboardEvent", "TouchEvent",
    "PointerEvent", "MessageChannel", "MessageEvent", "MessagePort", "XMLHttpRequest", "URL",
    "URLSearchParams", "Location", "History", "Navigator", "Performance", "Console", "Worker",
    "SharedWorker", "WebSocket", "ReadableStream", "ReadableStreamDefaultController",
    "ReadableStreamDefaultReader", "Headers", "Request", "Response", "Blob", "ImageData",
    "ImageBitmap", "OffscreenCanvas", "OffscreenCanvasRenderingContext2D",
    "CanvasRenderingContext2D", "CanvasGradient", "AudioContext", "BaseAudioContext", "AudioNode",
    "AudioParam", "AudioBuffer", "AudioDestinationNode", "GainNode", "ProgressEvent",
    "BroadcastChannel", "Lock", "LockManager", "MediaQueryList", "Storage", "AbortController",
    "AbortSignal", "AudioBufferSourceNode", "AudioScheduledSourceNode", "DOMException",
    "EventTarget", "TextDecoder",
];

/// DOM node and element classes.
pub const DOM_CLASSES: &[&str] = &[
    "Node", "Element", "Document", "CharacterData", "Text", "HTMLElement", "HTMLCollection",
    "NodeList", "DOMRect", "DOMRectReadOnly", "DOMStringMap", "DOMTokenList",
    "HTMLBodyElement", "HTMLButtonElement", "HTMLCanvasElement", "HTMLDivElement", "HTMLDocument",
    "HTMLHeadElement", "HTMLHeadingElement", "HTMLIFrameElement", "HTMLImageElement",
    "HTMLInputElement", "HTMLLinkElement", "HTMLScriptElement", "HTMLStyleElement",
    "CSSStyleDeclaration",
];

/// Three.js debug helper objects.
pub const THREE_HELPERS: &[&str] = &[
    "ArrowHelper", "AxesHelper", "BoxHelper", "Box3Helper", "CameraHelper",
    "DirectionalLightHelper", "GridHelper", "HemisphereLightHelper", "PlaneHelper",
    "PointLightHelper", "PolarGridHelper", "SkeletonHelper", "SpotLightHelper",
];

/// Three.js loader classes.
pub const THREE_LOADERS: &[&str] = &[
    "AnimationLoader", "AudioLoader", "BufferGeometryLoader", "CompressedTextureLoader",
    "CubeTextureLoader", "DataTextureLoader", "FileLoader", "ImageLoader", "ImageBitmapLoader",
    "Loader", "LoaderUtils", "MaterialLoader", "ObjectLoader", "TextureLoader", "GLTFLoader",
];

/// Three.js math primitives. Ubiquitous and short-lived; counting them
/// would drown the constructor report.
pub const THREE_MATH: &[&str] = &[
    "Box2", "Box3", "Color", "ColorKeyframeTrack", "Cylindrical", "Euler", "Frustum",
    "Interpolant", "CubicInterpolant", "DiscreteInterpolant", "LinearInterpolant",
    "QuaternionLinearInterpolant", "Line3", "Matrix3", "Matrix4", "Plane", "Quaternion", "Ray",
    "Sphere", "Spherical", "SphericalHarmonics3", "Triangle", "Vector2", "Vector3", "Vector4",
];

/// Three.js curve classes.
pub const THREE_CURVES: &[&str] = &[
    "ArcCurve", "CatmullRomCurve3", "CubicBezierCurve", "CubicBezierCurve3", "Curve", "CurvePath",
    "EllipseCurve", "LineCurve", "LineCurve3", "Path", "QuadraticBezierCurve",
    "QuadraticBezierCurve3", "Shape", "ShapePath", "SplineCurve",
];

/// Typed arrays and three.js buffer attribute wrappers.
pub const TYPED_ARRAYS_AND_ATTRIBUTES: &[&str] = &[
    "Int8Array", "Uint8Array", "Uint8ClampedArray", "Int16Array", "Uint16Array", "Int32Array",
    "Uint32Array", "Float32Array", "Float64Array", "BigInt64Array", "BigUint64Array",
    "Float16Array",
    "BufferAttribute", "GLBufferAttribute", "InstancedBufferAttribute",
    "InterleavedBufferAttribute", "Float16BufferAttribute", "Float32BufferAttribute",
    "Float64BufferAttribute", "Int8BufferAttribute", "Int16BufferAttribute",
    "Int32BufferAttribute", "Uint8BufferAttribute", "Uint16BufferAttribute",
    "Uint32BufferAttribute", "Uint8ClampedBufferAttribute",
];

/// Third-party service client internals (auth/storage/realtime SDKs,
/// bundler shims, WebAssembly classes) seen in real captures.
pub const OTHER_LIBS: &[&str] = &[
    "GoTrueAdminApi", "GoTrueClient", "SupabaseAuthClient", "SupabaseClient",
    "AuthApiError", "AuthError", "AuthImplicitGrantRedirectError", "AuthInvalidCredentialsError",
    "AuthInvalidJwtError", "AuthInvalidTokenResponseError", "AuthPKCEGrantCodeExchangeError",
    "AuthRetryableFetchError", "AuthSessionMissingError", "AuthUnknownError",
    "AuthWeakPasswordError", "CustomAuthError",
    "PostgrestBuilder", "PostgrestClient", "PostgrestError", "PostgrestFilterBuilder",
    "PostgrestQueryBuilder", "PostgrestTransformBuilder",
    "StorageApiError", "StorageBucketApi", "StorageClient", "StorageError", "StorageFileApi",
    "StorageUnknownError",
    "RealtimeChannel", "RealtimeClient", "RealtimePresence", "Timer", "Serializer", "Push",
    "FunctionsClient", "FunctionsError", "FunctionsFetchError", "FunctionsHttpError",
    "FunctionsRelayError",
    "Source", "HttpError", "Exception", "Deferred", "EventEmitter", "WebSocketClient",
    "WSWebSocketDummy", "WebpackLogger", "clientTapableSyncBailHook",
    "CallSite", "Global", "Instance", "Memory", "Module", "Table", "Tag",
    "ScriptWrappableTaskState",
    "_",
];

/// All fixed denylists, in one place for the classifier to fold.
pub const ALL_EXCLUDE_TABLES: &[&[&str]] = &[
    JS_BUILTINS,
    WEBGL_INTERNALS,
    BROWSER_APIS,
    DOM_CLASSES,
    THREE_HELPERS,
    THREE_LOADERS,
    THREE_MATH,
    THREE_CURVES,
    TYPED_ARRAYS_AND_ATTRIBUTES,
    OTHER_LIBS,
];
